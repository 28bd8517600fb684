//! Handle-Treffer in Screen-Koordinaten.

use crate::app::PreviewCamera;
use glam::{Vec2, Vec3};

/// Sucht das nächstgelegene Handle innerhalb von `radius_px` um `screen_pos`.
///
/// `screen_pos` ist relativ zur linken oberen Viewport-Ecke.
pub fn pick_handle(
    handles: &[Vec3],
    screen_pos: Vec2,
    viewport_size: Vec2,
    camera: &PreviewCamera,
    radius_px: f32,
) -> Option<usize> {
    handles
        .iter()
        .enumerate()
        .map(|(index, handle)| {
            let on_screen = camera.world_to_screen(handle.truncate(), viewport_size);
            (index, on_screen.distance(screen_pos))
        })
        .filter(|(_, distance)| *distance <= radius_px)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}
