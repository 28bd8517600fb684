//! Path Warp Editor Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod render;
pub mod shared;
pub mod ui;

pub use app::{
    AppCommand, AppController, AppIntent, AppState, ExportEvent, ExportReport, ExportSink,
    ParameterState, TickReport,
};
pub use core::{
    deform, DeformedMesh, FlatGrid, PathCurve, Plane, PreviewCamera, Ray, SourceImage,
    WarpError, WarpParams,
};
pub use render::{OffscreenRenderer, SoftwareRasterizer};
pub use shared::{RenderScene, WarpOptions};
