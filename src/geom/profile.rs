//! Vessel profile curves: sampling control points into a height-ordered
//! radius table, radius lookup at arbitrary heights, and the inner (cavity)
//! profile derived from the outer wall.

use super::core::Point2;
use super::fillet::{FilletPolylineDiagnostics, fillet_polyline_corners};
use super::spline::{CatmullRomCurve2, PROFILE_SPLINE_DIVISIONS};
use crate::params::CurveType;

/// Smallest radius the inner wall may shrink to.
pub const MIN_INNER_RADIUS: f64 = 0.001;

/// Ordered `(radius, height)` samples, non-decreasing in height.
///
/// Radii are normalised to the vessel width; heights are absolute.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileCurve {
    points: Vec<Point2>,
}

impl ProfileCurve {
    /// Builds a curve from arbitrary samples, stably sorting them by height.
    #[must_use]
    pub fn new(mut points: Vec<Point2>) -> Self {
        points.sort_by(|a, b| a.y.total_cmp(&b.y));
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn min_height(&self) -> Option<f64> {
        self.points.first().map(|p| p.y)
    }

    #[must_use]
    pub fn max_height(&self) -> Option<f64> {
        self.points.last().map(|p| p.y)
    }

    /// Vertical extent, `0.0` for an empty curve.
    #[must_use]
    pub fn height(&self) -> f64 {
        match (self.min_height(), self.max_height()) {
            (Some(lo), Some(hi)) => hi - lo,
            _ => 0.0,
        }
    }

    #[must_use]
    pub fn max_radius(&self) -> f64 {
        self.points.iter().map(|p| p.x).fold(0.0, f64::max)
    }

    /// Radius at height `y`, linearly interpolated between samples.
    ///
    /// Heights outside the curve clamp to the nearest end. An empty curve
    /// yields `0.0`; a zero-height segment yields its lower sample's radius.
    #[must_use]
    pub fn radius_at(&self, y: f64) -> f64 {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return 0.0;
        };
        if y.is_nan() || y <= first.y {
            return first.x;
        }
        if y >= last.y {
            return last.x;
        }

        // first.y < y < last.y, so 1 <= upper <= len - 1
        let upper = self.points.partition_point(|p| p.y <= y);
        let lo = self.points[upper - 1];
        let hi = self.points[upper];
        let dy = hi.y - lo.y;
        if dy <= 0.0 {
            return lo.x;
        }
        lo.x + (hi.x - lo.x) * ((y - lo.y) / dy)
    }
}

/// Settings that select and shape the profile curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSampling {
    pub curve_type: CurveType,
    pub tension: f64,
    pub fillet_radius: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileSampleDiagnostics {
    pub control_point_count: usize,
    pub sample_count: usize,
    pub fillet: Option<FilletPolylineDiagnostics>,
}

/// Turns control points into the outer profile curve.
///
/// Control-point radii are scaled by `width` while the curve is built (so
/// fillets and tangents act on true proportions) and normalised back
/// afterwards. Too few points yield an empty curve.
#[must_use]
pub fn sample_profile(
    control_points: &[Point2],
    sampling: ProfileSampling,
) -> (ProfileCurve, ProfileSampleDiagnostics) {
    let mut diagnostics = ProfileSampleDiagnostics {
        control_point_count: control_points.len(),
        ..Default::default()
    };

    let width = sampling.width;
    let scaled: Vec<Point2> = control_points
        .iter()
        .map(|p| Point2::new(p.x * width, p.y))
        .collect();

    let samples = match sampling.curve_type {
        CurveType::Spline => CatmullRomCurve2::new(&scaled, sampling.tension)
            .map(|curve| curve.sample(PROFILE_SPLINE_DIVISIONS))
            .unwrap_or_default(),
        CurveType::Polyline => {
            if scaled.is_empty() {
                Vec::new()
            } else {
                let (points, fillet) = fillet_polyline_corners(&scaled, sampling.fillet_radius);
                diagnostics.fillet = Some(fillet);
                points
            }
        }
    };

    let normalised: Vec<Point2> = samples
        .into_iter()
        .map(|p| Point2::new(p.x / width, p.y))
        .collect();

    diagnostics.sample_count = normalised.len();
    (ProfileCurve::new(normalised), diagnostics)
}

/// Derives the cavity profile by offsetting the outer profile inward by
/// `wall_thickness`.
///
/// Samples at or below `min_height + wall_thickness` all take the radius of
/// the cavity floor, flattening the bottom so the base slab has uniform
/// thickness. Radii never drop below `min_radius`. Heights are shared with
/// the outer curve sample for sample.
#[must_use]
pub fn derive_inner_profile(outer: &ProfileCurve, wall_thickness: f64, min_radius: f64) -> ProfileCurve {
    let Some(min_y) = outer.min_height() else {
        return ProfileCurve::default();
    };
    let floor_height = min_y + wall_thickness;
    let floor_radius = (outer.radius_at(floor_height) - wall_thickness).max(min_radius);

    let points = outer
        .points()
        .iter()
        .map(|p| {
            let radius = if p.y <= floor_height {
                floor_radius
            } else {
                (p.x - wall_thickness).max(min_radius)
            };
            Point2::new(radius, p.y)
        })
        .collect();

    // Same heights as `outer`, already ordered.
    ProfileCurve { points }
}
