//! UI-Komponenten: Menü, Eigenschaften, Status, Vorschau, Input-Handling, Dialoge.

pub mod dialogs;
pub mod input;
/// UI-Layer mit egui
///
/// Panels liefern ausschließlich `AppIntent`s zurück und mutieren den
/// AppState nicht selbst (Ausnahme: reine Eingabepuffer im `UiState`).
pub mod menu;
pub mod preview;
pub mod properties;
pub mod status;

pub use dialogs::handle_file_dialogs;
pub use input::InputState;
pub use menu::render_menu;
pub use preview::{paint_preview, PreviewTexture};
pub use properties::render_properties_panel;
pub use status::render_status_bar;
