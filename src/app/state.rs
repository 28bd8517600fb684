//! Application State — zentrale Datenhaltung.

mod app_state;
mod params;
mod ui;
mod view;

pub use app_state::AppState;
pub use params::ParameterState;
pub use ui::UiState;
pub use view::ViewState;
