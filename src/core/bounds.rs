//! Achsenparallele Bounding-Box für verformte Netze.

use glam::Vec3;

/// Achsenparallele Box im Weltkoordinatensystem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    /// Minimale Ecke
    pub min: Vec3,
    /// Maximale Ecke
    pub max: Vec3,
}

impl Bounds3 {
    /// Berechnet die Box über alle Punkte. Leere Eingabe ergibt `None`.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    /// Ausdehnung pro Achse.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Mittelpunkt der Box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Breite (x-Ausdehnung).
    pub fn width(&self) -> f32 {
        self.size().x
    }

    /// Höhe (y-Ausdehnung).
    pub fn height(&self) -> f32 {
        self.size().y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bounds_from_points() {
        let points = [
            Vec3::new(-1.0, 2.0, 0.0),
            Vec3::new(3.0, -1.0, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
        ];
        let bounds = Bounds3::from_points(&points).unwrap();
        assert_relative_eq!(bounds.width(), 4.0);
        assert_relative_eq!(bounds.height(), 3.0);
        assert_relative_eq!(bounds.center().x, 1.0);
        assert_relative_eq!(bounds.center().y, 0.5);
    }

    #[test]
    fn test_bounds_empty_is_none() {
        let points: [Vec3; 0] = [];
        assert!(Bounds3::from_points(&points).is_none());
    }
}
