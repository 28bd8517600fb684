//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Typen, die zwischen `app`, `render` und `ui` geteilt werden,
//! um direkte Abhängigkeiten zu vermeiden.

pub mod options;
mod render_scene;

pub use options::WarpOptions;
pub use options::{MAX_EXPORT_COLUMNS, MAX_HEIGHT_SCALE, MIN_HEIGHT_SCALE, MIN_IMAGE_LENGTH_RATIO};
pub use render_scene::{HandleMarker, RenderScene};
