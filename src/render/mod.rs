//! Off-Screen-Rendering für den Export.
//!
//! Der Export spricht nur mit dem Trait [`OffscreenRenderer`]; die
//! Standard-Implementierung ist der CPU-[`SoftwareRasterizer`].

mod rasterizer;
mod texture;

pub use rasterizer::SoftwareRasterizer;
pub use texture::{color_image, sample_bilinear};

use crate::core::{SourceImage, WarpResult};
use glam::{Vec2, Vec3};
use image::RgbaImage;

/// Orthografischer Ausschnitt, zentriert im Ursprung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoFrame {
    /// Halbe Breite in Welteinheiten
    pub half_width: f32,
    /// Halbe Höhe in Welteinheiten
    pub half_height: f32,
}

impl OrthoFrame {
    /// Rahmen für eine Welt-Ausdehnung (Breite × Höhe).
    pub fn from_extent(world_width: f32, world_height: f32) -> Self {
        Self {
            half_width: world_width * 0.5,
            half_height: world_height * 0.5,
        }
    }

    /// Bildet eine Weltposition auf Pixel-Koordinaten ab (y nach unten).
    pub fn world_to_pixel(&self, world: Vec2, width: u32, height: u32) -> Vec2 {
        let nx = (world.x + self.half_width) / (2.0 * self.half_width);
        let ny = (self.half_height - world.y) / (2.0 * self.half_height);
        Vec2::new(nx * width as f32, ny * height as f32)
    }
}

/// Auftrag an den Off-Screen-Renderer.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    /// Re-zentrierte Vertex-Positionen
    pub positions: &'a [Vec3],
    /// Texturkoordinaten (parallel zu `positions`)
    pub uvs: &'a [Vec2],
    /// Dreiecks-Indizes
    pub indices: &'a [u32],
    /// Orthografischer Ausschnitt (exakt die Bounding-Box)
    pub frame: OrthoFrame,
    /// Zielbreite in Pixeln
    pub width: u32,
    /// Zielhöhe in Pixeln
    pub height: u32,
}

/// Render-Kollaborator für Off-Screen-Ziele.
pub trait OffscreenRenderer {
    /// Ist die Textur des Quellbilds im Render-Kontext bereit?
    fn texture_ready(&mut self, image: &SourceImage) -> bool;

    /// Rendert das texturierte Netz in einen Pixelpuffer der angefragten Größe.
    fn render(&mut self, request: &RenderRequest<'_>, image: &SourceImage)
        -> WarpResult<RgbaImage>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_frame_corners_map_to_pixel_corners() {
        let frame = OrthoFrame::from_extent(4.0, 2.0);
        let top_left = frame.world_to_pixel(Vec2::new(-2.0, 1.0), 400, 200);
        let bottom_right = frame.world_to_pixel(Vec2::new(2.0, -1.0), 400, 200);
        assert_relative_eq!(top_left.x, 0.0);
        assert_relative_eq!(top_left.y, 0.0);
        assert_relative_eq!(bottom_right.x, 400.0);
        assert_relative_eq!(bottom_right.y, 200.0);
    }
}
