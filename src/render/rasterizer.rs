//! CPU-Rasterizer für texturierte Dreiecksnetze.

use super::texture::sample_bilinear;
use super::{OffscreenRenderer, RenderRequest};
use crate::core::mesh::barycentric;
use crate::core::{SourceImage, WarpError, WarpResult};
use glam::Vec2;
use image::{Rgba, RgbaImage};

/// Rasterisiert Dreiecke mit baryzentrischer UV-Interpolation.
///
/// Pixel werden an ihren Zentren getestet; der Hintergrund bleibt transparent.
/// Die Quelltextur liegt im Speicher, ist also sofort bereit.
#[derive(Debug, Default)]
pub struct SoftwareRasterizer {
    rendered_frames: u64,
}

impl SoftwareRasterizer {
    /// Erstellt einen neuen Rasterizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl bisher gerenderter Off-Screen-Ziele.
    pub fn rendered_frames(&self) -> u64 {
        self.rendered_frames
    }
}

impl OffscreenRenderer for SoftwareRasterizer {
    fn texture_ready(&mut self, _image: &SourceImage) -> bool {
        true
    }

    fn render(
        &mut self,
        request: &RenderRequest<'_>,
        image: &SourceImage,
    ) -> WarpResult<RgbaImage> {
        if request.width == 0 || request.height == 0 {
            return Err(WarpError::InvalidExportDimensions {
                width: request.width as i64,
                height: request.height as i64,
            });
        }

        let mut target = RgbaImage::new(request.width, request.height);
        let screen: Vec<Vec2> = request
            .positions
            .iter()
            .map(|p| {
                request
                    .frame
                    .world_to_pixel(p.truncate(), request.width, request.height)
            })
            .collect();

        for tri in request.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            fill_triangle(
                &mut target,
                [screen[a], screen[b], screen[c]],
                [request.uvs[a], request.uvs[b], request.uvs[c]],
                image.pixels(),
            );
        }

        self.rendered_frames += 1;
        log::debug!(
            "Off-Screen-Ziel gerendert: {}x{} Pixel, {} Dreiecke",
            request.width,
            request.height,
            request.indices.len() / 3
        );
        Ok(target)
    }
}

fn fill_triangle(target: &mut RgbaImage, pts: [Vec2; 3], uvs: [Vec2; 3], texture: &RgbaImage) {
    let (width, height) = target.dimensions();
    let min = pts[0].min(pts[1]).min(pts[2]);
    let max = pts[0].max(pts[1]).max(pts[2]);

    let x_start = min.x.floor().max(0.0) as u32;
    let y_start = min.y.floor().max(0.0) as u32;
    let x_end = (max.x.ceil().max(0.0) as u32).min(width);
    let y_end = (max.y.ceil().max(0.0) as u32).min(height);

    for y in y_start..y_end {
        for x in x_start..x_end {
            let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let Some(weights) = barycentric(center, pts[0], pts[1], pts[2]) else {
                continue;
            };
            let uv = uvs[0] * weights.x + uvs[1] * weights.y + uvs[2] * weights.z;
            let color = sample_bilinear(texture, uv);
            target.put_pixel(x, y, Rgba(color.map(|c| c.round().clamp(0.0, 255.0) as u8)));
        }
    }
}
