//! Verformtes Netz: Ausgabe-Positionen, Normalen, Bounds und Picking.

use super::bounds::Bounds3;
use super::grid::FlatGrid;
use glam::{Vec2, Vec3};

/// Netz mit den aktuellen (verformten) Positionen eines [`FlatGrid`].
///
/// UVs und Indizes stammen unverändert aus dem Gitter; Normalen und Bounds
/// werden nach jeder Positionsänderung neu berechnet.
#[derive(Debug, Clone)]
pub struct DeformedMesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
    bounds: Option<Bounds3>,
}

impl DeformedMesh {
    /// Erstellt ein Netz mit den flachen Referenzpositionen des Gitters.
    pub fn from_grid(grid: &FlatGrid) -> Self {
        let mut mesh = Self {
            positions: grid.reference_positions().to_vec(),
            normals: Vec::new(),
            uvs: grid.uvs().to_vec(),
            indices: grid.indices().to_vec(),
            bounds: None,
        };
        mesh.recompute_normals();
        mesh.recompute_bounds();
        mesh
    }

    /// Übernimmt neue Positionen und berechnet Normalen und Bounds neu.
    pub fn set_positions(&mut self, positions: Vec<Vec3>) {
        debug_assert_eq!(positions.len(), self.uvs.len());
        self.positions = positions;
        self.recompute_normals();
        self.recompute_bounds();
    }

    /// Mutable Positionen für In-Place-Deformation.
    ///
    /// Danach muss [`DeformedMesh::finish_update`] aufgerufen werden.
    pub fn positions_mut(&mut self) -> &mut Vec<Vec3> {
        &mut self.positions
    }

    /// Schließt eine In-Place-Aktualisierung ab (Normalen + Bounds).
    pub fn finish_update(&mut self) {
        self.recompute_normals();
        self.recompute_bounds();
    }

    /// Flächengewichtete Vertex-Normalen.
    pub fn recompute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let face = (self.positions[b] - self.positions[a])
                .cross(self.positions[c] - self.positions[a]);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }
        for normal in &mut normals {
            *normal = normal.try_normalize().unwrap_or(Vec3::Z);
        }
        self.normals = normals;
    }

    /// Bounding-Box der aktuellen Positionen.
    pub fn recompute_bounds(&mut self) {
        self.bounds = Bounds3::from_points(&self.positions);
    }

    /// Aktuelle Positionen.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Positionen als Byte-Slice (x, y, z als f32) für den GPU-Upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Vertex-Normalen.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Texturkoordinaten.
    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    /// Dreiecks-Indizes.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Bounding-Box (None bei leerem Netz).
    pub fn bounds(&self) -> Option<Bounds3> {
        self.bounds
    }

    /// Verschiebt alle Positionen so, dass `center` im Ursprung liegt.
    pub fn recentered(&self, center: Vec3) -> Vec<Vec3> {
        self.positions.iter().map(|p| *p - center).collect()
    }

    /// Ermittelt die UV-Koordinate der Oberfläche an einem Punkt der xy-Ebene.
    ///
    /// Baryzentrischer Test über alle Dreiecke; der erste Treffer gewinnt.
    pub fn pick_uv(&self, point: Vec2) -> Option<Vec2> {
        self.indices.chunks_exact(3).find_map(|tri| {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let weights = barycentric(
                point,
                self.positions[a].truncate(),
                self.positions[b].truncate(),
                self.positions[c].truncate(),
            )?;
            Some(self.uvs[a] * weights.x + self.uvs[b] * weights.y + self.uvs[c] * weights.z)
        })
    }
}

/// Baryzentrische Gewichte von `p` im Dreieck (a, b, c), `None` außerhalb.
///
/// Funktioniert für beide Umlaufrichtungen; entartete Dreiecke liefern `None`.
pub fn barycentric(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> Option<Vec3> {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;
    let denom = v0.perp_dot(v1);
    if denom.abs() < f32::EPSILON {
        return None;
    }
    let w1 = v2.perp_dot(v1) / denom;
    let w2 = v0.perp_dot(v2) / denom;
    let w0 = 1.0 - w1 - w2;
    const EDGE_TOLERANCE: f32 = -1e-5;
    if w0 < EDGE_TOLERANCE || w1 < EDGE_TOLERANCE || w2 < EDGE_TOLERANCE {
        return None;
    }
    Some(Vec3::new(w0, w1, w2))
}
