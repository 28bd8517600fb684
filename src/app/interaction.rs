//! Interaktions-Controller: Zeigerstrahlen → Pfad-Offset oder Kontrollpunkt.
//!
//! Jede ziehbare Entität (Oberfläche, jeder Handle) besitzt eine eigene
//! Zustandsmaschine `Idle → Active → Idle`. Beim Eintritt in `Active` wird
//! ein Snapshot aufgenommen; Bewegungen ohne Schnittpunkt werden für diesen
//! Frame verworfen.

use super::state::ParameterState;
use crate::core::{PathCurve, Plane, Ray, WarpError, WarpResult};
use glam::{Vec2, Vec3};
use std::collections::BTreeMap;

/// Opaker Zeiger-Bezeichner für exklusive Event-Zustellung.
pub type PointerId = u64;

/// Zustandsmaschine einer einzelnen Geste.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureState<S> {
    /// Keine Geste aktiv
    Idle,
    /// Geste aktiv, Zeiger gefangen
    Active {
        /// Zeiger, der die Geste besitzt
        pointer_id: PointerId,
        /// Beim Start aufgenommener Zustand
        snapshot: S,
    },
}

impl<S> Default for GestureState<S> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<S> GestureState<S> {
    /// Ist die Geste aktiv?
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Snapshot, falls die Geste vom gegebenen Zeiger gehalten wird.
    pub fn captured_by(&self, pointer: PointerId) -> Option<&S> {
        match self {
            Self::Active {
                pointer_id,
                snapshot,
            } if *pointer_id == pointer => Some(snapshot),
            _ => None,
        }
    }
}

/// Snapshot beim Start eines Oberflächen-Drags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDragSnapshot {
    /// Schnittpunkt mit der Referenzebene beim Start
    pub start_hit: Vec3,
    /// Pfad-Offset beim Start
    pub start_offset: f32,
    /// Bogenlängen-Anteil unter dem Zeiger beim Start
    pub start_t: f32,
    /// Normierte Kurventangente bei `start_t`
    pub tangent: Vec3,
    /// Kurvenlänge beim Start
    pub curve_length: f32,
}

/// Snapshot eines Handle-Drags.
///
/// Leer: der Kontrollpunkt folgt absolut dem Schnittpunkt, ein Startwert
/// wird nicht benötigt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandleDragSnapshot;

/// Zustände aller ziehbaren Entitäten.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    /// Oberflächen-Drag (Pfad-Offset)
    pub surface: GestureState<SurfaceDragSnapshot>,
    /// Aktive Handle-Drags pro Kontrollpunkt-Index (fehlend = Idle)
    handles: BTreeMap<usize, GestureState<HandleDragSnapshot>>,
}

impl InteractionState {
    /// Erstellt einen Zustand ohne aktive Gesten.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zustand des Handles mit dem gegebenen Index.
    pub fn handle(&self, index: usize) -> &GestureState<HandleDragSnapshot> {
        static IDLE: GestureState<HandleDragSnapshot> = GestureState::Idle;
        self.handles.get(&index).unwrap_or(&IDLE)
    }

    /// Indizes der gerade gezogenen Handles.
    pub fn active_handles(&self) -> impl Iterator<Item = usize> + '_ {
        self.handles
            .iter()
            .filter(|(_, gesture)| gesture.is_active())
            .map(|(index, _)| *index)
    }

    /// Handles, die vom gegebenen Zeiger gehalten werden.
    pub fn handles_captured_by(&self, pointer_id: PointerId) -> Vec<usize> {
        self.handles
            .iter()
            .filter(|(_, gesture)| gesture.captured_by(pointer_id).is_some())
            .map(|(index, _)| *index)
            .collect()
    }

    /// Hält der Zeiger den Oberflächen-Drag?
    pub fn surface_captured_by(&self, pointer_id: PointerId) -> bool {
        self.surface.captured_by(pointer_id).is_some()
    }

    /// Beendet alle Gesten eines Index ab `first_removed` (Kontrollpunkt entfernt).
    pub fn drop_handles_from(&mut self, first_removed: usize) {
        let removed = self.handles.split_off(&first_removed);
        if !removed.is_empty() {
            log::debug!("Handle-Drags beendet (Kontrollpunkt entfernt): {:?}", removed.keys());
        }
    }
}

/// Schnittpunkt eines Zeigerstrahls mit der Referenzebene z = 0.
pub fn reference_hit(ray: &Ray) -> WarpResult<Vec3> {
    ray.intersect_plane(&Plane::REFERENCE)
}

// ── Oberflächen-Drag ────────────────────────────────────────────────

/// Startet den Oberflächen-Drag.
///
/// Ohne Schnittpunkt oder ohne Kurve bleibt die Geste `Idle`.
pub fn begin_surface_drag(
    interaction: &mut InteractionState,
    params: &ParameterState,
    curve: Option<&PathCurve>,
    pointer_id: PointerId,
    ray: &Ray,
    hit_uv: Vec2,
) -> WarpResult<()> {
    if interaction.surface.is_active() {
        log::debug!("Oberflächen-Drag bereits aktiv, Press von Zeiger {} ignoriert", pointer_id);
        return Ok(());
    }

    let start_hit = reference_hit(ray)?;
    let curve = curve.ok_or(WarpError::GeometryUnavailable)?;

    let start_offset = params.path_offset();
    let start_t = (start_offset + hit_uv.x * params.image_length_ratio()).clamp(0.0, 1.0);
    let snapshot = SurfaceDragSnapshot {
        start_hit,
        start_offset,
        start_t,
        tangent: curve.tangent_at(start_t),
        curve_length: curve.length_approx(),
    };

    log::debug!(
        "Oberflächen-Drag Start: Zeiger {}, t = {:.3}, Offset = {:.3}",
        pointer_id,
        start_t,
        start_offset
    );
    interaction.surface = GestureState::Active {
        pointer_id,
        snapshot,
    };
    Ok(())
}

/// Aktualisiert den Pfad-Offset aus der aktuellen Zeigerposition.
///
/// Bewegungen fremder Zeiger werden ignoriert (`Ok(false)`).
pub fn update_surface_drag(
    interaction: &InteractionState,
    params: &mut ParameterState,
    pointer_id: PointerId,
    ray: &Ray,
) -> WarpResult<bool> {
    let Some(snapshot) = interaction.surface.captured_by(pointer_id) else {
        return Ok(false);
    };
    let hit = reference_hit(ray)?;
    params.set_path_offset(surface_drag_offset(snapshot, hit));
    Ok(true)
}

/// Neuer Pfad-Offset für einen Schnittpunkt relativ zum Drag-Start.
///
/// Die Verschiebung wird auf die Tangente projiziert und durch die
/// Kurvenlänge geteilt. Das Klemmen übernimmt der Parameter-Zustand.
pub fn surface_drag_offset(snapshot: &SurfaceDragSnapshot, hit: Vec3) -> f32 {
    if snapshot.curve_length <= f32::EPSILON {
        return snapshot.start_offset;
    }
    let along = (hit - snapshot.start_hit).dot(snapshot.tangent);
    snapshot.start_offset + along / snapshot.curve_length
}

/// Beendet den Oberflächen-Drag, falls er vom Zeiger gehalten wird.
pub fn end_surface_drag(interaction: &mut InteractionState, pointer_id: PointerId) -> bool {
    if !interaction.surface_captured_by(pointer_id) {
        return false;
    }
    interaction.surface = GestureState::Idle;
    log::debug!("Oberflächen-Drag Ende: Zeiger {}", pointer_id);
    true
}

// ── Handle-Drag ─────────────────────────────────────────────────────

/// Startet den Drag eines Kontrollpunkt-Handles.
pub fn begin_handle_drag(
    interaction: &mut InteractionState,
    params: &ParameterState,
    index: usize,
    pointer_id: PointerId,
    ray: &Ray,
) -> WarpResult<()> {
    let len = params.control_points().len();
    if index >= len {
        return Err(WarpError::ControlPointOutOfRange { index, len });
    }

    if interaction.handle(index).is_active() {
        log::debug!("Handle {} bereits aktiv, Press von Zeiger {} ignoriert", index, pointer_id);
        return Ok(());
    }

    reference_hit(ray)?;
    log::debug!("Handle-Drag Start: Index {}, Zeiger {}", index, pointer_id);
    interaction.handles.insert(
        index,
        GestureState::Active {
            pointer_id,
            snapshot: HandleDragSnapshot,
        },
    );
    Ok(())
}

/// Setzt den Kontrollpunkt absolut auf den aktuellen Schnittpunkt.
pub fn update_handle_drag(
    interaction: &InteractionState,
    params: &mut ParameterState,
    index: usize,
    pointer_id: PointerId,
    ray: &Ray,
) -> WarpResult<bool> {
    if interaction.handle(index).captured_by(pointer_id).is_none() {
        return Ok(false);
    }
    let hit = reference_hit(ray)?;
    params.set_control_point(index, hit)?;
    Ok(true)
}

/// Beendet den Handle-Drag, falls er vom Zeiger gehalten wird.
pub fn end_handle_drag(
    interaction: &mut InteractionState,
    index: usize,
    pointer_id: PointerId,
) -> bool {
    if interaction.handle(index).captured_by(pointer_id).is_none() {
        return false;
    }
    interaction.handles.remove(&index);
    log::debug!("Handle-Drag Ende: Index {}, Zeiger {}", index, pointer_id);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn down_ray(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 5.0), Vec3::NEG_Z)
    }

    fn straight_setup() -> (ParameterState, PathCurve) {
        let mut params = ParameterState::default();
        while params.remove_last_control_point().is_some() {}
        params.push_control_point(Vec3::new(-2.0, 0.0, 0.0));
        params.push_control_point(Vec3::new(2.0, 0.0, 0.0));
        let curve = PathCurve::build(params.control_points()).expect("Kurve erwartet");
        (params, curve)
    }

    #[test]
    fn test_surface_drag_moves_offset_along_tangent() {
        let (mut params, curve) = straight_setup();
        params.set_image_length_ratio(0.5);
        params.set_path_offset(0.1);
        let mut interaction = InteractionState::new();

        begin_surface_drag(
            &mut interaction,
            &params,
            Some(&curve),
            1,
            &down_ray(0.0, 0.0),
            Vec2::new(0.5, 0.5),
        )
        .expect("Start erwartet");
        assert!(interaction.surface.is_active());

        // 0.4 Einheiten entlang x bei Länge 4 → +0.1
        let moved = update_surface_drag(&interaction, &mut params, 1, &down_ray(0.4, 0.7))
            .expect("Update erwartet");
        assert!(moved);
        assert_relative_eq!(params.path_offset(), 0.2, epsilon = 1e-3);
    }

    #[test]
    fn test_surface_drag_result_is_clamped() {
        let (mut params, curve) = straight_setup();
        let mut interaction = InteractionState::new();
        begin_surface_drag(
            &mut interaction,
            &params,
            Some(&curve),
            1,
            &down_ray(0.0, 0.0),
            Vec2::new(0.0, 0.5),
        )
        .expect("Start erwartet");

        update_surface_drag(&interaction, &mut params, 1, &down_ray(100.0, 0.0))
            .expect("Update erwartet");
        assert_relative_eq!(params.path_offset(), params.max_path_offset());

        update_surface_drag(&interaction, &mut params, 1, &down_ray(-100.0, 0.0))
            .expect("Update erwartet");
        assert_relative_eq!(params.path_offset(), 0.0);
    }

    #[test]
    fn test_parallel_ray_keeps_surface_idle() {
        let (params, curve) = straight_setup();
        let mut interaction = InteractionState::new();
        let parallel = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::X);
        let result = begin_surface_drag(
            &mut interaction,
            &params,
            Some(&curve),
            1,
            &parallel,
            Vec2::ZERO,
        );
        assert!(matches!(result, Err(WarpError::NoIntersection)));
        assert!(!interaction.surface.is_active());
    }

    #[test]
    fn test_parallel_move_is_ignored_for_one_frame() {
        let (mut params, curve) = straight_setup();
        let mut interaction = InteractionState::new();
        begin_surface_drag(
            &mut interaction,
            &params,
            Some(&curve),
            1,
            &down_ray(0.0, 0.0),
            Vec2::ZERO,
        )
        .expect("Start erwartet");
        update_surface_drag(&interaction, &mut params, 1, &down_ray(0.4, 0.0))
            .expect("Update erwartet");
        let offset = params.path_offset();

        let parallel = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Y);
        let result = update_surface_drag(&interaction, &mut params, 1, &parallel);
        assert!(matches!(result, Err(WarpError::NoIntersection)));
        assert_relative_eq!(params.path_offset(), offset);
        assert!(interaction.surface.is_active());
    }

    #[test]
    fn test_surface_drag_without_curve_stays_idle() {
        let (params, _) = straight_setup();
        let mut interaction = InteractionState::new();
        let result = begin_surface_drag(
            &mut interaction,
            &params,
            None,
            1,
            &down_ray(0.0, 0.0),
            Vec2::ZERO,
        );
        assert!(matches!(result, Err(WarpError::GeometryUnavailable)));
        assert!(!interaction.surface.is_active());
    }

    #[test]
    fn test_foreign_pointer_does_not_move_surface() {
        let (mut params, curve) = straight_setup();
        let mut interaction = InteractionState::new();
        begin_surface_drag(
            &mut interaction,
            &params,
            Some(&curve),
            1,
            &down_ray(0.0, 0.0),
            Vec2::ZERO,
        )
        .expect("Start erwartet");

        let moved = update_surface_drag(&interaction, &mut params, 2, &down_ray(1.0, 0.0))
            .expect("kein Fehler");
        assert!(!moved);
        assert_relative_eq!(params.path_offset(), 0.0);
        assert!(!end_surface_drag(&mut interaction, 2));
        assert!(end_surface_drag(&mut interaction, 1));
        assert!(!interaction.surface.is_active());
    }

    #[test]
    fn test_handle_drag_sets_absolute_position() {
        let mut params = ParameterState::default();
        let mut interaction = InteractionState::new();
        begin_handle_drag(&mut interaction, &params, 2, 7, &down_ray(0.75, 0.5))
            .expect("Start erwartet");
        assert_eq!(interaction.active_handles().collect::<Vec<_>>(), vec![2]);

        update_handle_drag(&interaction, &mut params, 2, 7, &down_ray(1.0, -1.0))
            .expect("Update erwartet");
        assert_eq!(params.control_points()[2], Vec3::new(1.0, -1.0, 0.0));

        assert!(end_handle_drag(&mut interaction, 2, 7));
        assert!(!interaction.handle(2).is_active());
    }

    #[test]
    fn test_handle_drag_rejects_unknown_index() {
        let params = ParameterState::default();
        let mut interaction = InteractionState::new();
        let result = begin_handle_drag(&mut interaction, &params, 9, 1, &down_ray(0.0, 0.0));
        assert!(matches!(
            result,
            Err(WarpError::ControlPointOutOfRange { index: 9, len: 4 })
        ));
        assert!(!interaction.handle(9).is_active());
        assert_eq!(
            interaction.handle(2),
            &GestureState::<HandleDragSnapshot>::Idle
        );
    }

    #[test]
    fn test_handle_and_surface_are_independent() {
        let mut params = ParameterState::default();
        let curve = PathCurve::build(params.control_points()).expect("Kurve erwartet");
        let mut interaction = InteractionState::new();

        begin_surface_drag(
            &mut interaction,
            &params,
            Some(&curve),
            1,
            &down_ray(0.0, 0.0),
            Vec2::new(0.2, 0.5),
        )
        .expect("Start erwartet");
        begin_handle_drag(&mut interaction, &params, 0, 2, &down_ray(-1.5, 0.5))
            .expect("Start erwartet");

        update_handle_drag(&interaction, &mut params, 0, 2, &down_ray(-1.6, 0.4))
            .expect("Update erwartet");
        assert!(interaction.surface.is_active());
        assert!(interaction.handle(0).is_active());
        assert_eq!(interaction.handles_captured_by(2), vec![0]);
        assert!(interaction.surface_captured_by(1));
    }

    #[test]
    fn test_drop_handles_from_removed_index() {
        let params = ParameterState::default();
        let mut interaction = InteractionState::new();
        begin_handle_drag(&mut interaction, &params, 3, 1, &down_ray(1.5, -0.5))
            .expect("Start erwartet");
        begin_handle_drag(&mut interaction, &params, 1, 2, &down_ray(-0.75, -0.5))
            .expect("Start erwartet");
        interaction.drop_handles_from(3);
        assert!(!interaction.handle(3).is_active());
        assert!(interaction.handle(1).is_active());
    }

    #[test]
    fn test_offset_projection_ignores_perpendicular_motion() {
        let snapshot = SurfaceDragSnapshot {
            start_hit: Vec3::ZERO,
            start_offset: 0.25,
            start_t: 0.5,
            tangent: Vec3::X,
            curve_length: 2.0,
        };
        assert_relative_eq!(surface_drag_offset(&snapshot, Vec3::new(0.0, 3.0, 0.0)), 0.25);
        assert_relative_eq!(surface_drag_offset(&snapshot, Vec3::new(0.5, 3.0, 0.0)), 0.5);
    }
}
