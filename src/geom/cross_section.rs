use std::f64::consts::FRAC_PI_2;

use super::core::Point2;
use super::vessel::GenerationError;

/// Minimum number of points a closed cross-section outline needs.
pub const MIN_CROSS_SECTION_POINTS: usize = 3;

/// Maximum number of points a cross-section outline may be sampled into.
pub const MAX_CROSS_SECTION_POINTS: usize = 1 << 16;

/// Closed horizontal outline reused for every ring of the vessel.
///
/// Points are `(x, z)` pairs stored as [`Point2`] (`p.y` is world Z), ordered
/// counter-clockwise when viewed from +Y, without a repeated closing point.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSection {
    points: Vec<Point2>,
    corner_radius: f64,
}

impl CrossSection {
    /// Rounded rectangle with half-extents `half_width` x `half_depth`.
    ///
    /// The corner radius is `fillet_fraction * min(half_width, half_depth)`,
    /// clamped to `[0, min(half_width, half_depth)]`. The outline starts at
    /// `(-half_width + r, half_depth)`, runs toward +X, and is sampled into
    /// exactly `segments` points spaced evenly by arc length.
    pub fn rounded_rectangle(
        half_width: f64,
        half_depth: f64,
        fillet_fraction: f64,
        segments: usize,
    ) -> Result<Self, GenerationError> {
        if !(MIN_CROSS_SECTION_POINTS..=MAX_CROSS_SECTION_POINTS).contains(&segments) {
            return Err(GenerationError::InvalidCrossSection { count: segments });
        }
        let min_half = half_width.min(half_depth);
        if !(min_half.is_finite() && min_half > 0.0) {
            return Err(GenerationError::InvalidParameter {
                name: "cross_section_half_extent",
                value: min_half,
                expected: "a finite value greater than 0",
            });
        }

        let radius = (fillet_fraction * min_half).clamp(0.0, min_half);
        let outline = Outline::new(half_width, half_depth, radius);
        let step = outline.perimeter() / segments as f64;
        let points = (0..segments)
            .map(|k| outline.point_at(k as f64 * step))
            .collect();

        Ok(Self {
            points,
            corner_radius: radius,
        })
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
    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    /// Shoelace area; positive for counter-clockwise order in the `(x, z)` plane.
    #[must_use]
    pub fn signed_area_xz(&self) -> f64 {
        let n = self.points.len();
        (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum::<f64>()
            * 0.5
    }
}

/// The continuous rounded-rectangle path: four sides, each a straight edge
/// followed by a quarter-circle corner.
struct Outline {
    half_width: f64,
    half_depth: f64,
    radius: f64,
}

impl Outline {
    fn new(half_width: f64, half_depth: f64, radius: f64) -> Self {
        Self {
            half_width,
            half_depth,
            radius,
        }
    }

    fn arc_length(&self) -> f64 {
        FRAC_PI_2 * self.radius
    }

    /// Straight edge lengths in traversal order: +Z side, +X side, -Z side, -X side.
    fn edge_lengths(&self) -> [f64; 4] {
        let w = 2.0 * (self.half_width - self.radius);
        let d = 2.0 * (self.half_depth - self.radius);
        [w, d, w, d]
    }

    fn perimeter(&self) -> f64 {
        self.edge_lengths().iter().sum::<f64>() + 4.0 * self.arc_length()
    }

    /// Point at arc length `s` from the start.
    fn point_at(&self, s: f64) -> Point2 {
        let (hw, hd, r) = (self.half_width, self.half_depth, self.radius);
        // Edge start point and direction per side, then corner centre.
        let sides = [
            (Point2::new(-hw + r, hd), (1.0, 0.0), Point2::new(hw - r, hd - r)),
            (Point2::new(hw, hd - r), (0.0, -1.0), Point2::new(hw - r, -hd + r)),
            (Point2::new(hw - r, -hd), (-1.0, 0.0), Point2::new(-hw + r, -hd + r)),
            (Point2::new(-hw, -hd + r), (0.0, 1.0), Point2::new(-hw + r, hd - r)),
        ];
        let arc = self.arc_length();

        let mut remaining = s.max(0.0);
        for (side, ((start, (dx, dz), centre), edge)) in
            sides.iter().zip(self.edge_lengths()).enumerate()
        {
            if remaining <= edge {
                return Point2::new(start.x + dx * remaining, start.y + dz * remaining);
            }
            remaining -= edge;
            if remaining <= arc || side == 3 {
                let t = if arc > 0.0 { (remaining / arc).min(1.0) } else { 0.0 };
                // Corners run clockwise in (x, z) math orientation, starting
                // at +90 degrees for the first corner.
                let angle = FRAC_PI_2 - side as f64 * FRAC_PI_2 - t * FRAC_PI_2;
                return Point2::new(centre.x + r * angle.cos(), centre.y + r * angle.sin());
            }
            remaining -= arc;
        }
        Point2::new(-hw + r, hd)
    }
}
