//! Core-Domänentypen: Spline, Gitter, Deformation, Netz, Strahl, Kamera, Quellbild.

pub mod bounds;
pub mod camera;
pub mod deform;
pub mod error;
pub mod grid;
pub mod mesh;
pub mod ray;
pub mod source_image;
/// Pfad-Modell
///
/// Zentripetale Catmull-Rom-Kurve mit Bogenlängen-Abfragen.
pub mod spline;

pub use bounds::Bounds3;
pub use camera::PreviewCamera;
pub use deform::{deform, deform_into, deform_vertex, path_fraction, WarpParams};
pub use error::{WarpError, WarpResult};
pub use grid::FlatGrid;
pub use mesh::DeformedMesh;
pub use ray::{Plane, Ray};
pub use source_image::SourceImage;
pub use spline::PathCurve;
