//! Open Catmull-Rom spline through profile control points.
//!
//! Each span `p1 -> p2` is a cubic Hermite segment whose end tangents are
//! `tension * (p2 - p0)` and `tension * (p3 - p1)`. The missing neighbours at
//! the two ends are extrapolated by mirroring (`2 * p0 - p1`), so the curve
//! passes through every control point including the first and last.

use super::core::Point2;

/// Parameter divisions used when the profile is sampled for meshing.
pub const PROFILE_SPLINE_DIVISIONS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRomCurve2 {
    points: Vec<Point2>,
    tension: f64,
}

impl CatmullRomCurve2 {
    /// Returns `None` when fewer than two control points are given.
    #[must_use]
    pub fn new(points: &[Point2], tension: f64) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        Some(Self {
            points: points.to_vec(),
            tension,
        })
    }

    #[must_use]
    pub fn control_points(&self) -> &[Point2] {
        &self.points
    }

    /// Evaluates the curve at `t` in `[0, 1]` (clamped).
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        let n = self.points.len();
        let t = t.clamp(0.0, 1.0);
        let p = (n - 1) as f64 * t;
        // Truncation is the intended floor for a non-negative span position.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mut span = p.floor() as usize;
        let mut weight = p - span as f64;
        if span >= n - 1 {
            span = n - 2;
            weight = 1.0;
        }

        let p1 = self.points[span];
        let p2 = self.points[span + 1];
        let p0 = if span > 0 {
            self.points[span - 1]
        } else {
            mirror(p1, p2)
        };
        let p3 = if span + 2 < n {
            self.points[span + 2]
        } else {
            mirror(p2, p1)
        };

        Point2::new(
            hermite(p0.x, p1.x, p2.x, p3.x, self.tension, weight),
            hermite(p0.y, p1.y, p2.y, p3.y, self.tension, weight),
        )
    }

    /// Samples `divisions + 1` points at equal parameter steps, both ends included.
    #[must_use]
    pub fn sample(&self, divisions: usize) -> Vec<Point2> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|d| self.point_at(d as f64 / divisions as f64))
            .collect()
    }
}

/// Reflects `neighbour` through `anchor`.
fn mirror(anchor: Point2, neighbour: Point2) -> Point2 {
    Point2::new(2.0 * anchor.x - neighbour.x, 2.0 * anchor.y - neighbour.y)
}

fn hermite(x0: f64, x1: f64, x2: f64, x3: f64, tension: f64, w: f64) -> f64 {
    let t0 = tension * (x2 - x0);
    let t1 = tension * (x3 - x1);
    let c0 = x1;
    let c1 = t0;
    let c2 = -3.0 * x1 + 3.0 * x2 - 2.0 * t0 - t1;
    let c3 = 2.0 * x1 - 2.0 * x2 + t0 + t1;
    let w2 = w * w;
    c0 + c1 * w + c2 * w2 + c3 * w2 * w
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_single_point() {
        assert!(CatmullRomCurve2::new(&[Point2::new(0.1, 0.0)], 0.5).is_none());
    }

    #[test]
    fn interpolates_control_points() {
        let points = [
            Point2::new(0.1, 0.0),
            Point2::new(0.22, 0.2),
            Point2::new(0.3, 0.5),
            Point2::new(0.2, 0.8),
        ];
        let curve = CatmullRomCurve2::new(&points, 0.5).expect("curve");
        for (i, expected) in points.iter().enumerate() {
            let p = curve.point_at(i as f64 / 3.0);
            assert!((p.x - expected.x).abs() < 1e-12, "x at {i}");
            assert!((p.y - expected.y).abs() < 1e-12, "y at {i}");
        }
    }

    #[test]
    fn two_points_at_half_tension_is_a_line() {
        let a = Point2::new(0.3, 0.0);
        let b = Point2::new(0.3, 1.0);
        let curve = CatmullRomCurve2::new(&[a, b], 0.5).expect("curve");
        let samples = curve.sample(PROFILE_SPLINE_DIVISIONS);
        assert_eq!(samples.len(), PROFILE_SPLINE_DIVISIONS + 1);
        for (i, p) in samples.iter().enumerate() {
            let t = i as f64 / PROFILE_SPLINE_DIVISIONS as f64;
            assert!((p.x - 0.3).abs() < 1e-12);
            assert!((p.y - t).abs() < 1e-12);
        }
    }

    #[test]
    fn sampling_is_deterministic() {
        let points = [Point2::new(0.1, 0.0), Point2::new(0.4, 0.6), Point2::new(0.2, 1.2)];
        let curve = CatmullRomCurve2::new(&points, 0.5).expect("curve");
        assert_eq!(curve.sample(50), curve.sample(50));
    }
}
