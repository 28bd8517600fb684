//! Strahl/Ebene-Schnitt für das Ziehen in der Referenzebene.

use super::error::{WarpError, WarpResult};
use glam::Vec3;

/// Zeigerstrahl aus dem Eingabe-Kollaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ursprung des Strahls
    pub origin: Vec3,
    /// Richtung (Einheitsvektor)
    pub direction: Vec3,
}

impl Ray {
    /// Erstellt einen Strahl.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Schnittpunkt mit einer Ebene.
    ///
    /// Ein zur Ebene paralleler Strahl liefert [`WarpError::NoIntersection`].
    pub fn intersect_plane(&self, plane: &Plane) -> WarpResult<Vec3> {
        let denom = self.direction.dot(plane.normal);
        if denom.abs() <= f32::EPSILON {
            return Err(WarpError::NoIntersection);
        }
        let s = -(self.origin.dot(plane.normal) + plane.constant) / denom;
        Ok(self.origin + self.direction * s)
    }
}

/// Ebene in Hesse-Form: `normal · p + constant = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normierte Ebenennormale
    pub normal: Vec3,
    /// Abstandsterm
    pub constant: f32,
}

impl Plane {
    /// Feste Referenzebene z = 0 mit Normale (0, 0, 1).
    pub const REFERENCE: Plane = Plane {
        normal: Vec3::Z,
        constant: 0.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_straight_down_hits_origin() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = ray.intersect_plane(&Plane::REFERENCE).unwrap();
        assert_relative_eq!(hit.x, 0.0);
        assert_relative_eq!(hit.y, 0.0);
        assert_relative_eq!(hit.z, 0.0);
    }

    #[test]
    fn test_parallel_ray_has_no_intersection() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(matches!(
            ray.intersect_plane(&Plane::REFERENCE),
            Err(WarpError::NoIntersection)
        ));
    }

    #[test]
    fn test_oblique_ray() {
        let direction = Vec3::new(1.0, 0.0, -1.0).normalize();
        let ray = Ray::new(Vec3::new(0.0, 2.0, 3.0), direction);
        let hit = ray.intersect_plane(&Plane::REFERENCE).unwrap();
        assert_relative_eq!(hit.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(hit.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(hit.z, 0.0, epsilon = 1e-5);
    }
}
