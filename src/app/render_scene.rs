//! Builder für Render-Szenen aus dem AppState.

use crate::app::AppState;
use crate::shared::{HandleMarker, RenderScene};

/// Baut eine RenderScene aus dem aktuellen AppState.
pub fn build(state: &AppState, viewport_size: [f32; 2]) -> RenderScene {
    let mesh = state.live.mesh();

    let handles = state
        .params
        .control_points()
        .iter()
        .enumerate()
        .map(|(index, position)| HandleMarker {
            index,
            position: *position,
            active: state.interaction.handle(index).is_active(),
        })
        .collect();

    let path_polyline = state
        .curve
        .current()
        .map(|curve| curve.sample_polyline(state.options.path_preview_samples))
        .unwrap_or_default();

    RenderScene {
        positions: mesh.positions().to_vec(),
        uvs: mesh.uvs().to_vec(),
        indices: mesh.indices().to_vec(),
        handles,
        path_polyline,
        camera: state.view.camera.clone(),
        viewport_size,
        image_revision: state.image.revision(),
        is_exporting: state.params.is_exporting(),
        handle_radius_px: state.options.handle_radius_px,
        handle_color: state.options.handle_color,
        handle_active_color: state.options.handle_active_color,
        path_color: state.options.path_color,
    }
}
