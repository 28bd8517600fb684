//! Kontinuierliche Neuberechnung des interaktiven Netzes.
//!
//! Wird einmal pro Frame vom externen Render-Loop angestoßen. Der Mapper
//! selbst ist zustandslos; hier liegen nur die abgeleiteten Puffer.

use super::state::ParameterState;
use super::AppState;
use crate::core::{deform_into, DeformedMesh, FlatGrid, PathCurve};

/// Zwischenspeicher der Kurve, neu gebaut bei geänderter Kontrollpunkt-Revision.
#[derive(Debug, Clone)]
pub struct CurveCache {
    revision: Option<u64>,
    samples_per_segment: usize,
    curve: Option<PathCurve>,
}

impl CurveCache {
    /// Erstellt einen leeren Cache.
    pub fn new(samples_per_segment: usize) -> Self {
        Self {
            revision: None,
            samples_per_segment: samples_per_segment.max(1),
            curve: None,
        }
    }

    /// Liefert die Kurve zu den aktuellen Kontrollpunkten (baut bei Bedarf neu).
    ///
    /// `None` bei weniger als zwei Kontrollpunkten.
    pub fn get(&mut self, params: &ParameterState) -> Option<&PathCurve> {
        let revision = params.control_points_revision();
        if self.revision != Some(revision) {
            self.curve =
                PathCurve::build_with_samples(params.control_points(), self.samples_per_segment);
            self.revision = Some(revision);
            match &self.curve {
                Some(curve) => log::debug!(
                    "Kurve neu gebaut: {} Kontrollpunkte, Länge {:.3}",
                    params.control_points().len(),
                    curve.length_approx()
                ),
                None => log::debug!("Kurve nicht verfügbar: weniger als zwei Kontrollpunkte"),
            }
        }
        self.curve.as_ref()
    }

    /// Zuletzt gebaute Kurve ohne Revisions-Prüfung.
    pub fn current(&self) -> Option<&PathCurve> {
        self.curve.as_ref()
    }
}

/// Live-Gitter und dessen verformtes Netz für die Vorschau.
#[derive(Debug, Clone)]
pub struct LiveGeometry {
    grid: FlatGrid,
    mesh: DeformedMesh,
}

impl LiveGeometry {
    /// Erstellt ein flaches Live-Gitter.
    pub fn new(resolution: u32, height_scale: f32) -> Self {
        let grid = FlatGrid::interactive(resolution, height_scale);
        let mesh = DeformedMesh::from_grid(&grid);
        Self { grid, mesh }
    }

    /// Baut Gitter und Netz neu, wenn Auflösung oder Höhe abweichen.
    pub fn ensure(&mut self, resolution: u32, height_scale: f32) -> bool {
        if self.grid.columns() == resolution.max(1) && self.grid.height_scale() == height_scale {
            return false;
        }
        *self = Self::new(resolution, height_scale);
        log::debug!(
            "Live-Gitter neu aufgebaut: {} Spalten, Halbhöhe {:.3}",
            self.grid.columns(),
            height_scale
        );
        true
    }

    /// Unverformtes Gitter.
    pub fn grid(&self) -> &FlatGrid {
        &self.grid
    }

    /// Verformtes Netz (letzte gültige Ausgabe).
    pub fn mesh(&self) -> &DeformedMesh {
        &self.mesh
    }
}

/// Ergebnis eines Recompute-Ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputeOutcome {
    /// Positionen, Normalen und Bounds wurden neu berechnet
    Updated,
    /// Keine Kurve: vorherige Ausgabe bleibt stehen
    SkippedNoCurve,
}

/// Führt einen Recompute-Tick auf dem Live-Gitter aus.
pub fn run(state: &mut AppState) -> RecomputeOutcome {
    let params = &state.params;
    state
        .live
        .ensure(params.resolution(), params.height_scale());

    let curve = state.curve.get(params);
    let live = &mut state.live;
    if !deform_into(
        live.grid.reference_positions(),
        curve,
        &params.warp_params(),
        live.mesh.positions_mut(),
    ) {
        return RecomputeOutcome::SkippedNoCurve;
    }
    live.mesh.finish_update();
    RecomputeOutcome::Updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;

    #[test]
    fn test_curve_cache_rebuilds_on_revision_change() {
        let mut params = ParameterState::default();
        let mut cache = CurveCache::new(32);
        let before = cache.get(&params).map(|c| c.point_at(1.0));

        params
            .set_control_point(3, Vec3::new(2.0, 0.0, 0.0))
            .expect("Index gültig");
        let after = cache.get(&params).map(|c| c.point_at(1.0));

        assert_ne!(before, after);
        let end = after.expect("Kurve erwartet");
        assert_relative_eq!(end.x, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_curve_cache_absent_below_two_points() {
        let mut params = ParameterState::default();
        while params.control_points().len() > 1 {
            params.remove_last_control_point();
        }
        let mut cache = CurveCache::new(32);
        assert!(cache.get(&params).is_none());
    }

    #[test]
    fn test_live_geometry_rebuilds_on_resolution_change() {
        let mut live = LiveGeometry::new(10, 1.0);
        assert!(!live.ensure(10, 1.0));
        assert!(live.ensure(20, 1.0));
        assert_eq!(live.grid().columns(), 20);
        assert_eq!(live.mesh().positions().len(), live.grid().vertex_count());
    }
}
