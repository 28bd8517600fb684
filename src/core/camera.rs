//! Orthografische Vorschau-Kamera mit Pan und Zoom.
//!
//! Blickt entlang -z auf die Referenzebene und erzeugt Zeigerstrahlen
//! für den Interaktions-Controller.

use super::ray::Ray;
use glam::{Vec2, Vec3};

/// Orthografische Kamera über der Referenzebene
#[derive(Debug, Clone)]
pub struct PreviewCamera {
    /// Blickpunkt in Welt-Koordinaten (xy-Ebene)
    pub position: Vec2,
    /// Zoom-Level (1.0 = normal, 2.0 = doppelt so groß)
    pub zoom: f32,
}

impl PreviewCamera {
    /// Sichtbare Welt-Halbhöhe bei Zoom 1.0.
    pub const BASE_WORLD_EXTENT: f32 = 2.0;
    /// Minimaler Zoom-Faktor.
    pub const ZOOM_MIN: f32 = 0.1;
    /// Maximaler Zoom-Faktor.
    pub const ZOOM_MAX: f32 = 20.0;
    /// Abstand des Strahl-Ursprungs über der Referenzebene.
    pub const EYE_DISTANCE: f32 = 5.0;

    /// Erstellt eine neue Kamera
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    /// Verschiebt die Kamera (Pan)
    pub fn pan(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Ändert den Zoom-Level
    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(Self::ZOOM_MIN, Self::ZOOM_MAX);
    }

    /// Welt-Einheiten pro Screen-Pixel.
    pub fn world_per_pixel(&self, viewport_height: f32) -> f32 {
        2.0 * Self::BASE_WORLD_EXTENT / (self.zoom * viewport_height.max(1.0))
    }

    /// Konvertiert Screen-Koordinaten (Ursprung oben links) zu Welt-Koordinaten.
    /// Screen-y zeigt nach unten, Welt-y nach oben.
    pub fn screen_to_world(&self, screen_pos: Vec2, screen_size: Vec2) -> Vec2 {
        let scale = self.world_per_pixel(screen_size.y);
        let centered = screen_pos - screen_size * 0.5;
        Vec2::new(centered.x * scale, -centered.y * scale) + self.position
    }

    /// Konvertiert Welt-Koordinaten zu Screen-Koordinaten.
    pub fn world_to_screen(&self, world_pos: Vec2, screen_size: Vec2) -> Vec2 {
        let scale = self.world_per_pixel(screen_size.y);
        let relative = (world_pos - self.position) / scale;
        Vec2::new(relative.x, -relative.y) + screen_size * 0.5
    }

    /// Zeigerstrahl durch einen Screen-Punkt (orthografisch, Richtung -z).
    pub fn screen_ray(&self, screen_pos: Vec2, screen_size: Vec2) -> Ray {
        let world = self.screen_to_world(screen_pos, screen_size);
        Ray::new(world.extend(Self::EYE_DISTANCE), Vec3::NEG_Z)
    }

    /// Pick-Radius in Welteinheiten für einen Pixel-Radius.
    pub fn pick_radius_world(&self, viewport_height: f32, pick_radius_px: f32) -> f32 {
        pick_radius_px * self.world_per_pixel(viewport_height)
    }
}

impl Default for PreviewCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_zoom_is_clamped() {
        let mut camera = PreviewCamera::new();
        camera.zoom_by(2.0);
        assert_relative_eq!(camera.zoom, 2.0);
        camera.zoom_by(1000.0);
        assert_relative_eq!(camera.zoom, PreviewCamera::ZOOM_MAX);
    }

    #[test]
    fn test_screen_center_maps_to_camera_position() {
        let mut camera = PreviewCamera::new();
        camera.pan(Vec2::new(0.5, -0.25));
        let size = Vec2::new(800.0, 600.0);
        let world = camera.screen_to_world(Vec2::new(400.0, 300.0), size);
        assert_relative_eq!(world.x, 0.5);
        assert_relative_eq!(world.y, -0.25);
    }

    #[test]
    fn test_screen_top_is_positive_world_y() {
        let camera = PreviewCamera::new();
        let size = Vec2::new(800.0, 600.0);
        let top = camera.screen_to_world(Vec2::new(400.0, 0.0), size);
        assert_relative_eq!(top.y, PreviewCamera::BASE_WORLD_EXTENT, epsilon = 1e-5);
    }

    #[test]
    fn test_world_screen_roundtrip() {
        let mut camera = PreviewCamera::new();
        camera.zoom = 1.7;
        camera.position = Vec2::new(0.3, 0.1);
        let size = Vec2::new(1024.0, 768.0);
        let screen = Vec2::new(123.0, 456.0);
        let back = camera.world_to_screen(camera.screen_to_world(screen, size), size);
        assert_relative_eq!(back.x, screen.x, epsilon = 1e-3);
        assert_relative_eq!(back.y, screen.y, epsilon = 1e-3);
    }

    #[test]
    fn test_screen_ray_points_down() {
        let camera = PreviewCamera::new();
        let ray = camera.screen_ray(Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0));
        assert_relative_eq!(ray.origin.z, PreviewCamera::EYE_DISTANCE);
        assert_eq!(ray.direction, Vec3::NEG_Z);
    }
}
