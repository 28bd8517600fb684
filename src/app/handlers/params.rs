//! Handler für Parameter-Änderungen und Kontrollpunkt-Bearbeitung.

use crate::app::AppState;
use glam::Vec3;

/// Setzt die Gitterauflösung.
pub fn set_resolution(state: &mut AppState, value: u32) {
    state.params.set_resolution(value);
}

/// Setzt die Warp-Intensität.
pub fn set_warp_intensity(state: &mut AppState, value: f32) {
    state.params.set_warp_intensity(value);
}

/// Setzt die halbe Gitterhöhe.
pub fn set_height_scale(state: &mut AppState, value: f32) {
    state.params.set_height_scale(value);
}

/// Setzt den Pfad-Offset (geklemmt).
pub fn set_path_offset(state: &mut AppState, value: f32) {
    state.params.set_path_offset(value);
}

/// Setzt den Bildlängen-Anteil (klemmt den Offset neu).
pub fn set_image_length_ratio(state: &mut AppState, value: f32) {
    state.params.set_image_length_ratio(value);
}

/// Setzt einen Kontrollpunkt. Ungültige Indizes werden geloggt und ignoriert.
pub fn set_control_point(state: &mut AppState, index: usize, position: Vec3) {
    if let Err(e) = state.params.set_control_point(index, position) {
        log::warn!("Kontrollpunkt nicht gesetzt: {}", e);
    }
}

/// Hängt einen Kontrollpunkt an.
pub fn add_control_point(state: &mut AppState, position: Vec3) {
    state.params.push_control_point(position);
    log::info!(
        "Kontrollpunkt hinzugefügt: ({:.2}, {:.2}), jetzt {}",
        position.x,
        position.y,
        state.params.control_points().len()
    );
}

/// Entfernt den letzten Kontrollpunkt und beendet dessen Handle-Drag.
pub fn remove_last_control_point(state: &mut AppState) {
    if state.params.remove_last_control_point().is_none() {
        log::debug!("Keine Kontrollpunkte zum Entfernen");
        return;
    }
    let remaining = state.params.control_points().len();
    state.interaction.drop_handles_from(remaining);
    log::info!("Kontrollpunkt entfernt, jetzt {}", remaining);
}
