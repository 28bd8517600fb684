//! Application-Layer: Controller, State, Events, Interaktion, Recompute und Export.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod export;
pub mod handlers;
pub mod image_loader;
mod intent_mapping;
pub mod interaction;
pub mod recompute;
pub mod render_scene;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Parameter, Bild, Gesten, View).
pub mod state;

pub use crate::core::PreviewCamera;
pub use command_log::CommandLog;
pub use controller::{AppController, TickReport};
pub use events::{AppCommand, AppIntent};
pub use export::{ExportEvent, ExportPlan, ExportReport, ExportSink, FileExportSink};
pub use image_loader::{ImageLoadEvent, ImageSlot};
pub use interaction::{GestureState, InteractionState, PointerId};
pub use recompute::RecomputeOutcome;
pub use render_scene::build as build_render_scene;
pub use state::{AppState, ParameterState, UiState, ViewState};
