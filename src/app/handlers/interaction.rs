//! Handler für Oberflächen- und Handle-Gesten.
//!
//! Fehler einzelner Gestenschritte (kein Schnittpunkt, keine Kurve) werden
//! nur geloggt: die Geste bleibt bzw. wird `Idle`, der Zustand unverändert.

use crate::app::interaction::{self, PointerId};
use crate::app::AppState;
use crate::core::Ray;
use glam::Vec2;

/// Startet den Oberflächen-Drag.
pub fn begin_surface_drag(state: &mut AppState, pointer_id: PointerId, ray: Ray, uv: Vec2) {
    let curve = state.curve.get(&state.params);
    if let Err(e) = interaction::begin_surface_drag(
        &mut state.interaction,
        &state.params,
        curve,
        pointer_id,
        &ray,
        uv,
    ) {
        log::debug!("Oberflächen-Drag nicht gestartet: {}", e);
    }
}

/// Aktualisiert den Pfad-Offset während des Oberflächen-Drags.
pub fn update_surface_drag(state: &mut AppState, pointer_id: PointerId, ray: Ray) {
    if let Err(e) =
        interaction::update_surface_drag(&state.interaction, &mut state.params, pointer_id, &ray)
    {
        log::debug!("Oberflächen-Drag-Schritt verworfen: {}", e);
    }
}

/// Beendet den Oberflächen-Drag.
pub fn end_surface_drag(state: &mut AppState, pointer_id: PointerId) {
    interaction::end_surface_drag(&mut state.interaction, pointer_id);
}

/// Startet den Drag eines Kontrollpunkt-Handles.
pub fn begin_handle_drag(state: &mut AppState, index: usize, pointer_id: PointerId, ray: Ray) {
    if let Err(e) = interaction::begin_handle_drag(
        &mut state.interaction,
        &state.params,
        index,
        pointer_id,
        &ray,
    ) {
        log::debug!("Handle-Drag nicht gestartet: {}", e);
    }
}

/// Setzt den gezogenen Kontrollpunkt auf den Schnittpunkt.
pub fn update_handle_drag(state: &mut AppState, index: usize, pointer_id: PointerId, ray: Ray) {
    if let Err(e) = interaction::update_handle_drag(
        &state.interaction,
        &mut state.params,
        index,
        pointer_id,
        &ray,
    ) {
        log::debug!("Handle-Drag-Schritt verworfen: {}", e);
    }
}

/// Beendet den Handle-Drag.
pub fn end_handle_drag(state: &mut AppState, index: usize, pointer_id: PointerId) {
    interaction::end_handle_drag(&mut state.interaction, index, pointer_id);
}
