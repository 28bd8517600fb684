//! Zentripetale Catmull-Rom-Kurve mit Bogenlängen-Parametrisierung.
//!
//! Die Kurve läuft offen durch alle Kontrollpunkte. Abfragen erfolgen über den
//! globalen Bogenlängen-Anteil `t ∈ [0, 1]`, nicht über den Segment-Index:
//! gleiche Schritte in `t` entsprechen annähernd gleicher Strecke entlang des Pfads.

use glam::Vec3;

/// Standard-Anzahl an Stützstellen pro Segment für die Bogenlängen-Tabelle.
pub const DEFAULT_SAMPLES_PER_SEGMENT: usize = 64;
/// Mindestanzahl an Tabellen-Intervallen, unabhängig von der Segmentanzahl.
const MIN_TABLE_INTERVALS: usize = 200;
/// Knotenabstände unterhalb dieses Werts gelten als zusammenfallende Punkte.
const MIN_KNOT_SPACING: f32 = 1e-4;
/// Ableitungen unterhalb dieser Länge liefern keine Richtung.
const MIN_TANGENT_LENGTH: f32 = 1e-6;

/// Kubisches Polynom eines Kurvensegments: `c0 + c1·t + c2·t² + c3·t³`.
#[derive(Debug, Clone, Copy)]
struct CubicSegment {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl CubicSegment {
    /// Segment von `p1` nach `p2` mit zentripetaler Knotenverteilung (alpha = 0.5).
    fn centripetal(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        // |Δp|^0.5 == (|Δp|²)^0.25
        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);

        if dt1 < MIN_KNOT_SPACING {
            dt1 = 1.0;
        }
        if dt0 < MIN_KNOT_SPACING {
            dt0 = dt1;
        }
        if dt2 < MIN_KNOT_SPACING {
            dt2 = dt1;
        }

        let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

        Self::hermite(p1, p2, t1, t2)
    }

    fn hermite(x0: Vec3, x1: Vec3, t0: Vec3, t1: Vec3) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    fn point(&self, t: f32) -> Vec3 {
        self.c0 + t * (self.c1 + t * (self.c2 + t * self.c3))
    }

    fn derivative(&self, t: f32) -> Vec3 {
        self.c1 + t * (2.0 * self.c2 + 3.0 * t * self.c3)
    }
}

/// Eintrag der Bogenlängen-Tabelle.
#[derive(Debug, Clone, Copy)]
struct ArcSample {
    /// Globaler Kurvenparameter in [0, 1]
    parameter: f32,
    /// Kumulierte Länge bis zu diesem Parameter
    length: f32,
}

/// Glatter Pfad durch eine geordnete Liste von Kontrollpunkten.
///
/// Nach dem Aufbau read-only. Änderungen an den Kontrollpunkten erfordern
/// einen Neuaufbau über [`PathCurve::build`].
#[derive(Debug, Clone)]
pub struct PathCurve {
    control_points: Vec<Vec3>,
    segments: Vec<CubicSegment>,
    table: Vec<ArcSample>,
}

impl PathCurve {
    /// Baut die Kurve. Weniger als zwei Punkte ergeben `None`.
    pub fn build(points: &[Vec3]) -> Option<Self> {
        Self::build_with_samples(points, DEFAULT_SAMPLES_PER_SEGMENT)
    }

    /// Baut die Kurve mit einer vorgegebenen Tabellendichte pro Segment.
    pub fn build_with_samples(points: &[Vec3], samples_per_segment: usize) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }

        let n = points.len();
        let segments: Vec<CubicSegment> = (0..n - 1)
            .map(|seg| {
                // Phantom-Punkte an den Rändern spiegeln, damit die Kurve
                // durch den ersten und letzten Punkt läuft
                let p0 = if seg == 0 {
                    2.0 * points[0] - points[1]
                } else {
                    points[seg - 1]
                };
                let p3 = if seg + 2 < n {
                    points[seg + 2]
                } else {
                    2.0 * points[n - 1] - points[n - 2]
                };
                CubicSegment::centripetal(p0, points[seg], points[seg + 1], p3)
            })
            .collect();

        let mut curve = Self {
            control_points: points.to_vec(),
            segments,
            table: Vec::new(),
        };
        let intervals = (curve.segments.len() * samples_per_segment.max(1)).max(MIN_TABLE_INTERVALS);
        curve.table = curve.build_arc_table(intervals);

        log::debug!(
            "PathCurve gebaut: {} Kontrollpunkte, Länge {:.4}",
            n,
            curve.length_approx()
        );

        Some(curve)
    }

    fn build_arc_table(&self, intervals: usize) -> Vec<ArcSample> {
        let mut table = Vec::with_capacity(intervals + 1);
        let mut prev = self.point_at_parameter(0.0);
        let mut cumulative = 0.0;
        table.push(ArcSample {
            parameter: 0.0,
            length: 0.0,
        });

        for i in 1..=intervals {
            let parameter = i as f32 / intervals as f32;
            let current = self.point_at_parameter(parameter);
            cumulative += current.distance(prev);
            table.push(ArcSample {
                parameter,
                length: cumulative,
            });
            prev = current;
        }

        table
    }

    /// Ordnet einen globalen Parameter dem Segment und dem lokalen Parameter zu.
    fn locate(&self, parameter: f32) -> (&CubicSegment, f32) {
        let count = self.segments.len();
        let scaled = parameter.clamp(0.0, 1.0) * count as f32;
        let index = (scaled.floor() as usize).min(count - 1);
        (&self.segments[index], scaled - index as f32)
    }

    fn point_at_parameter(&self, parameter: f32) -> Vec3 {
        let (segment, local) = self.locate(parameter);
        segment.point(local)
    }

    fn derivative_at_parameter(&self, parameter: f32) -> Vec3 {
        let (segment, local) = self.locate(parameter);
        segment.derivative(local)
    }

    /// Approximierte Gesamtlänge (Polyline über die Bogenlängen-Tabelle).
    pub fn length_approx(&self) -> f32 {
        self.table.last().map(|s| s.length).unwrap_or(0.0)
    }

    /// Wandelt einen Bogenlängen-Anteil in den globalen Kurvenparameter um.
    pub fn parameter_at(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let total = self.length_approx();
        if total <= f32::EPSILON || self.table.len() < 2 {
            return t;
        }

        let target = t * total;
        if target <= 0.0 {
            return 0.0;
        }
        if target >= total {
            return 1.0;
        }

        let idx = self
            .table
            .binary_search_by(|sample| {
                sample
                    .length
                    .partial_cmp(&target)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or_else(|i| i.saturating_sub(1))
            .min(self.table.len() - 2);

        let s0 = self.table[idx];
        let s1 = self.table[idx + 1];
        let span = s1.length - s0.length;
        if span.abs() < f32::EPSILON {
            return s0.parameter;
        }

        let ratio = ((target - s0.length) / span).clamp(0.0, 1.0);
        s0.parameter + (s1.parameter - s0.parameter) * ratio
    }

    /// Punkt beim Bogenlängen-Anteil `t`.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.point_at_parameter(self.parameter_at(t))
    }

    /// Normierte Tangente beim Bogenlängen-Anteil `t`.
    ///
    /// An entarteten Stellen (zusammenfallende Punkte) wird die nächstgelegene
    /// wohldefinierte Tangente verwendet.
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let parameter = self.parameter_at(t);
        let derivative = self.derivative_at_parameter(parameter);
        if derivative.length() > MIN_TANGENT_LENGTH {
            return derivative.normalize();
        }
        self.nearest_defined_tangent(parameter)
    }

    fn nearest_defined_tangent(&self, parameter: f32) -> Vec3 {
        let steps = self.table.len().max(2) - 1;
        let step = 1.0 / steps as f32;

        for k in 1..=steps {
            let offset = k as f32 * step;
            for candidate in [parameter - offset, parameter + offset] {
                if !(0.0..=1.0).contains(&candidate) {
                    continue;
                }
                let derivative = self.derivative_at_parameter(candidate);
                if derivative.length() > MIN_TANGENT_LENGTH {
                    return derivative.normalize();
                }
            }
        }

        // Alle Punkte identisch: Sehnenrichtung oder feste X-Achse
        let first = self.control_points[0];
        let last = self.control_points[self.control_points.len() - 1];
        (last - first).try_normalize().unwrap_or(Vec3::X)
    }

    /// Kontrollpunkte, aus denen die Kurve gebaut wurde.
    pub fn control_points(&self) -> &[Vec3] {
        &self.control_points
    }

    /// Gleichmäßig (nach Bogenlänge) verteilte Punkte entlang der Kurve.
    pub fn sample_polyline(&self, count: usize) -> Vec<Vec3> {
        let count = count.max(2);
        (0..count)
            .map(|i| self.point_at(i as f32 / (count - 1) as f32))
            .collect()
    }
}
