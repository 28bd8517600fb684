//! Unverformtes Rechteck-Gitter als Eingabe der Deformation.

use glam::{Vec2, Vec3};

/// Flaches Gitter: 2 Welteinheiten breit, `2 × height_scale` hoch.
///
/// Die Referenzpositionen werden beim Aufbau festgelegt und danach nicht mehr
/// verändert; nur die Ausgabe der Deformation ändert sich.
#[derive(Debug, Clone)]
pub struct FlatGrid {
    columns: u32,
    rows: u32,
    height_scale: f32,
    reference_positions: Vec<Vec3>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
}

impl FlatGrid {
    /// Breite des Gitters in Welteinheiten (x ∈ [-1, 1]).
    pub const WIDTH: f32 = 2.0;

    /// Erstellt ein Gitter mit `columns × rows` Zellen.
    ///
    /// Vertices liegen zeilenweise von oben (y = +height_scale) nach unten,
    /// UV (0, 0) ist die linke obere Bildecke.
    pub fn new(columns: u32, rows: u32, height_scale: f32) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        let stride = columns as usize + 1;
        let vertex_count = stride * (rows as usize + 1);

        let mut reference_positions = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);

        for row in 0..=rows {
            let v = row as f32 / rows as f32;
            let y = height_scale - 2.0 * height_scale * v;
            for column in 0..=columns {
                let u = column as f32 / columns as f32;
                reference_positions.push(Vec3::new(-1.0 + Self::WIDTH * u, y, 0.0));
                uvs.push(Vec2::new(u, v));
            }
        }

        let mut indices = Vec::with_capacity(columns as usize * rows as usize * 6);
        for row in 0..rows {
            for column in 0..columns {
                let a = row * (columns + 1) + column;
                let b = a + 1;
                let c = a + columns + 1;
                let d = c + 1;
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        Self {
            columns,
            rows,
            height_scale,
            reference_positions,
            uvs,
            indices,
        }
    }

    /// Interaktives Gitter: `resolution` Spalten, genau eine Zeile.
    pub fn interactive(resolution: u32, height_scale: f32) -> Self {
        Self::new(resolution, 1, height_scale)
    }

    /// Anzahl der Spalten (Zellen horizontal).
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Anzahl der Zeilen (Zellen vertikal).
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Halbe Gitterhöhe, mit der das Gitter gebaut wurde.
    pub fn height_scale(&self) -> f32 {
        self.height_scale
    }

    /// Unveränderliche Eingabepositionen der Deformation.
    pub fn reference_positions(&self) -> &[Vec3] {
        &self.reference_positions
    }

    /// Texturkoordinaten pro Vertex.
    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    /// Dreiecks-Indizes (zwei Dreiecke pro Zelle).
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Anzahl der Vertices.
    pub fn vertex_count(&self) -> usize {
        self.reference_positions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_interactive_grid_layout() {
        let grid = FlatGrid::interactive(50, 1.0);
        assert_eq!(grid.columns(), 50);
        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.vertex_count(), 51 * 2);
        assert_eq!(grid.indices().len(), 50 * 6);

        let first = grid.reference_positions()[0];
        let last = *grid.reference_positions().last().unwrap();
        assert_relative_eq!(first.x, -1.0);
        assert_relative_eq!(first.y, 1.0);
        assert_relative_eq!(last.x, 1.0);
        assert_relative_eq!(last.y, -1.0);
    }

    #[test]
    fn test_height_scale_sets_vertical_extent() {
        let grid = FlatGrid::new(4, 2, 0.25);
        let ys: Vec<f32> = grid.reference_positions().iter().map(|p| p.y).collect();
        let max = ys.iter().cloned().fold(f32::MIN, f32::max);
        let min = ys.iter().cloned().fold(f32::MAX, f32::min);
        assert_relative_eq!(max, 0.25);
        assert_relative_eq!(min, -0.25);
    }

    #[test]
    fn test_uvs_span_unit_square() {
        let grid = FlatGrid::new(3, 3, 1.0);
        assert_eq!(grid.uvs()[0], Vec2::new(0.0, 0.0));
        assert_eq!(*grid.uvs().last().unwrap(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_zero_resolution_is_clamped() {
        let grid = FlatGrid::new(0, 0, 1.0);
        assert_eq!(grid.columns(), 1);
        assert_eq!(grid.rows(), 1);
        assert!(grid
            .indices()
            .iter()
            .all(|&i| (i as usize) < grid.vertex_count()));
    }
}
