//! Deformation: bildet das flache Gitter auf den Pfad ab.
//!
//! Horizontal folgt jeder Vertex der Kurve (tangential), vertikal wird er
//! entlang der In-Ebene-Normale versetzt. Reine Funktionen ohne Zustand.

use super::grid::FlatGrid;
use super::spline::PathCurve;
use glam::Vec3;

/// Skalare Parameter der Deformation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarpParams {
    /// Faktor auf den Normalen-Versatz (0 = flach auf der Mittellinie)
    pub warp_intensity: f32,
    /// Bogenlängen-Anteil, an dem die linke Bildkante beginnt
    pub path_offset: f32,
    /// Anteil der Kurvenlänge, den die volle Bildbreite abdeckt
    pub image_length_ratio: f32,
}

/// Bogenlängen-Anteil für eine horizontale Gitterkoordinate `x ∈ [-1, 1]`.
///
/// Werte außerhalb des Pfads werden auf die Enden geklemmt (keine Extrapolation).
pub fn path_fraction(x: f32, path_offset: f32, image_length_ratio: f32) -> f32 {
    let u = (x + 1.0) * 0.5;
    (path_offset + u * image_length_ratio).clamp(0.0, 1.0)
}

/// In-Ebene-Normale: Tangente um 90° um die z-Achse gedreht.
pub fn in_plane_normal(tangent: Vec3) -> Vec3 {
    Vec3::new(-tangent.y, tangent.x, 0.0)
}

/// Verformt einen einzelnen Referenz-Vertex.
pub fn deform_vertex(reference: Vec3, curve: &PathCurve, params: &WarpParams) -> Vec3 {
    let t = path_fraction(reference.x, params.path_offset, params.image_length_ratio);
    let point = curve.point_at(t);
    let tangent = curve.tangent_at(t).normalize_or_zero();
    point + in_plane_normal(tangent) * (reference.y * params.warp_intensity)
}

/// Schreibt die verformten Positionen in `out` (gleiche Länge wie `reference`).
///
/// Ohne Kurve wird nichts geschrieben und `false` zurückgegeben; der Aufrufer
/// behält dann die vorherigen Positionen.
pub fn deform_into(
    reference: &[Vec3],
    curve: Option<&PathCurve>,
    params: &WarpParams,
    out: &mut Vec<Vec3>,
) -> bool {
    let Some(curve) = curve else {
        return false;
    };

    out.clear();
    out.extend(reference.iter().map(|&p| deform_vertex(p, curve, params)));
    true
}

/// Verformt alle Vertices eines Gitters.
///
/// Ohne Kurve (weniger als zwei Kontrollpunkte) ist die Abbildung die Identität.
pub fn deform(grid: &FlatGrid, curve: Option<&PathCurve>, params: &WarpParams) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(grid.vertex_count());
    if !deform_into(grid.reference_positions(), curve, params, &mut out) {
        out.extend_from_slice(grid.reference_positions());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn s_curve() -> PathCurve {
        PathCurve::build(&[
            Vec3::new(-1.5, 0.5, 0.0),
            Vec3::new(-0.75, -0.5, 0.0),
            Vec3::new(0.75, 0.5, 0.0),
            Vec3::new(1.5, -0.5, 0.0),
        ])
        .expect("Kurve erwartet")
    }

    fn default_params() -> WarpParams {
        WarpParams {
            warp_intensity: 1.0,
            path_offset: 0.0,
            image_length_ratio: 0.5,
        }
    }

    #[test]
    fn test_path_fraction_clamps_to_path() {
        assert_relative_eq!(path_fraction(-1.0, 0.0, 0.5), 0.0);
        assert_relative_eq!(path_fraction(1.0, 0.0, 0.5), 0.5);
        assert_relative_eq!(path_fraction(1.0, 0.8, 0.5), 1.0);
        assert_relative_eq!(path_fraction(-1.0, -0.2, 0.5), 0.0);
    }

    #[test]
    fn test_edge_columns_map_to_expected_path_points() {
        let curve = s_curve();
        let grid = FlatGrid::interactive(50, 1.0);
        let params = WarpParams {
            warp_intensity: 0.0,
            ..default_params()
        };
        let positions = deform(&grid, Some(&curve), &params);

        let left = positions[0];
        let right = positions[50];
        assert_relative_eq!(left.x, curve.point_at(0.0).x, epsilon = 1e-6);
        assert_relative_eq!(left.y, curve.point_at(0.0).y, epsilon = 1e-6);
        assert_relative_eq!(right.x, curve.point_at(0.5).x, epsilon = 1e-6);
        assert_relative_eq!(right.y, curve.point_at(0.5).y, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_intensity_collapses_onto_centerline() {
        let curve = s_curve();
        let grid = FlatGrid::new(10, 4, 1.0);
        let params = WarpParams {
            warp_intensity: 0.0,
            ..default_params()
        };
        let positions = deform(&grid, Some(&curve), &params);

        for (reference, deformed) in grid.reference_positions().iter().zip(&positions) {
            let t = path_fraction(reference.x, 0.0, 0.5);
            let on_path = curve.point_at(t);
            assert_relative_eq!(deformed.x, on_path.x, epsilon = 1e-6);
            assert_relative_eq!(deformed.y, on_path.y, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_normal_offset_is_perpendicular_to_tangent() {
        let curve = s_curve();
        let params = default_params();
        let reference = Vec3::new(0.2, 0.7, 0.0);
        let deformed = deform_vertex(reference, &curve, &params);

        let t = path_fraction(reference.x, params.path_offset, params.image_length_ratio);
        let offset = deformed - curve.point_at(t);
        assert_relative_eq!(offset.length(), 0.7, epsilon = 1e-4);
        assert_relative_eq!(offset.dot(curve.tangent_at(t)), 0.0, epsilon = 1e-4);
        assert_relative_eq!(deformed.z, 0.0);
    }

    #[test]
    fn test_deform_is_idempotent() {
        let curve = s_curve();
        let grid = FlatGrid::new(20, 3, 0.8);
        let params = WarpParams {
            warp_intensity: 1.3,
            path_offset: 0.2,
            image_length_ratio: 0.6,
        };
        let a = deform(&grid, Some(&curve), &params);
        let b = deform(&grid, Some(&curve), &params);
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_curve_is_identity() {
        let grid = FlatGrid::interactive(8, 1.0);
        let positions = deform(&grid, None, &default_params());
        assert_eq!(positions, grid.reference_positions());

        let mut out = vec![Vec3::splat(9.0)];
        assert!(!deform_into(
            grid.reference_positions(),
            None,
            &default_params(),
            &mut out
        ));
        assert_eq!(out, vec![Vec3::splat(9.0)]);
    }
}
