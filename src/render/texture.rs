//! Textur-Utilities: Bilinear-Sampling für den Rasterizer und egui-Upload.

use crate::core::SourceImage;
use glam::Vec2;
use image::{imageops, RgbaImage};

/// Bilineares Sampling mit Clamp-to-Edge an einer UV-Koordinate.
///
/// UV (0, 0) ist die linke obere Bildecke, Texelzentren liegen bei
/// `(i + 0.5) / Breite`. UV außerhalb von [0, 1] wird auf den Rand geklemmt.
pub fn sample_bilinear(image: &RgbaImage, uv: Vec2) -> [f32; 4] {
    let uv = uv.clamp(Vec2::ZERO, Vec2::ONE);
    imageops::sample_bilinear(image, uv.x, uv.y)
        .map(|pixel| pixel.0.map(f32::from))
        .unwrap_or([0.0; 4])
}

/// Konvertiert ein Quellbild in ein egui-`ColorImage` für den Textur-Upload.
pub fn color_image(image: &SourceImage) -> egui::ColorImage {
    let (width, height) = image.dimensions();
    log::debug!(
        "Erstelle Vorschau-Textur '{}': {}x{} Pixel",
        image.label(),
        width,
        height
    );
    egui::ColorImage::from_rgba_unmultiplied(
        [width as usize, height as usize],
        image.pixels().as_raw(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Rgba;

    fn two_by_one() -> RgbaImage {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([200, 100, 50, 255]));
        image
    }

    #[test]
    fn test_texel_centers_return_exact_colors() {
        let image = two_by_one();
        let left = sample_bilinear(&image, Vec2::new(0.25, 0.5));
        let right = sample_bilinear(&image, Vec2::new(0.75, 0.5));
        assert_relative_eq!(left[0], 0.0);
        assert_relative_eq!(right[0], 200.0);
        assert_relative_eq!(right[3], 255.0);
    }

    #[test]
    fn test_midpoint_is_interpolated() {
        let image = two_by_one();
        let mid = sample_bilinear(&image, Vec2::new(0.5, 0.5));
        assert_relative_eq!(mid[0], 100.0, epsilon = 1e-3);
        assert_relative_eq!(mid[1], 50.0, epsilon = 1e-3);
    }

    #[test]
    fn test_outside_uv_is_clamped_to_edge() {
        let image = two_by_one();
        let outside = sample_bilinear(&image, Vec2::new(3.0, -2.0));
        assert_relative_eq!(outside[0], 200.0);
    }

    #[test]
    fn test_empty_image_samples_transparent() {
        let image = RgbaImage::new(0, 0);
        assert_eq!(sample_bilinear(&image, Vec2::new(0.5, 0.5)), [0.0; 4]);
    }

    #[test]
    fn test_edge_uv_matches_edge_texel() {
        let image = two_by_one();
        let edge = sample_bilinear(&image, Vec2::new(1.0, 1.0));
        assert_relative_eq!(edge[0], 200.0);
        assert_relative_eq!(edge[2], 50.0);
    }
}
