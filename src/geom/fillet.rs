use super::core::{Point2, Vec2};

/// Radii below this value disable corner rounding altogether.
pub const MIN_FILLET_RADIUS: f64 = 0.01;

/// Share of the shorter adjacent edge a single fillet may consume.
pub const FILLET_EDGE_SHARE: f64 = 0.499;

/// Corner angles (radians) below this are treated as fold-backs and left sharp.
const MIN_CORNER_ANGLE: f64 = 0.001;

/// Tangent distances below this are too small to be worth rounding.
const MIN_TANGENT_DISTANCE: f64 = 0.001;

/// Arc points emitted per radian of corner angle.
const ARC_POINTS_PER_RADIAN: f64 = 8.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilletPolylineDiagnostics {
    pub input_point_count: usize,
    pub output_point_count: usize,
    pub corner_count: usize,
    pub filleted_corner_count: usize,
    pub skipped_corner_count: usize,
    pub clamped_corner_count: usize,
}

/// Tangent distance for one corner, after clamping to the adjacent edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerFillet {
    pub to_prev: Vec2,
    pub to_next: Vec2,
    pub angle: f64,
    pub distance: f64,
    pub clamped: bool,
}

/// Computes the rounding of the corner at `corner`, or `None` when the corner
/// should be kept sharp (zero-length edge, fold-back, or negligible distance).
#[must_use]
pub fn corner_fillet(prev: Point2, corner: Point2, next: Point2, radius: f64) -> Option<CornerFillet> {
    let to_prev_raw = prev.sub_point(corner);
    let to_next_raw = next.sub_point(corner);
    let to_prev = to_prev_raw.normalized()?;
    let to_next = to_next_raw.normalized()?;

    let angle = to_prev.dot(to_next).clamp(-1.0, 1.0).acos();
    if !angle.is_finite() || angle < MIN_CORNER_ANGLE {
        return None;
    }

    let ideal = radius / (angle * 0.5).tan();
    let limit = to_prev_raw.length().min(to_next_raw.length()) * FILLET_EDGE_SHARE;
    let distance = ideal.min(limit);
    if !distance.is_finite() || distance < MIN_TANGENT_DISTANCE {
        return None;
    }

    Some(CornerFillet {
        to_prev,
        to_next,
        angle,
        distance,
        clamped: ideal > limit,
    })
}

/// Rounds the interior corners of an open polyline.
///
/// End points pass through unchanged. Each rounded corner is replaced by the
/// two tangent points and `max(2, ceil(angle * 8)) - 1` arc points between
/// them, all at the clamped tangent distance from the corner.
#[must_use]
pub fn fillet_polyline_corners(
    points: &[Point2],
    radius: f64,
) -> (Vec<Point2>, FilletPolylineDiagnostics) {
    let mut diagnostics = FilletPolylineDiagnostics {
        input_point_count: points.len(),
        ..Default::default()
    };

    if points.len() < 2 || !radius.is_finite() || radius < MIN_FILLET_RADIUS {
        diagnostics.output_point_count = points.len();
        return (points.to_vec(), diagnostics);
    }

    let mut out = Vec::with_capacity(points.len() * 4);
    out.push(points[0]);

    for window in points.windows(3) {
        let (prev, corner, next) = (window[0], window[1], window[2]);
        diagnostics.corner_count += 1;

        let Some(fillet) = corner_fillet(prev, corner, next, radius) else {
            diagnostics.skipped_corner_count += 1;
            out.push(corner);
            continue;
        };
        if fillet.clamped {
            diagnostics.clamped_corner_count += 1;
        }
        diagnostics.filleted_corner_count += 1;
        push_corner_arc(&mut out, corner, &fillet);
    }

    if let Some(last) = points.last() {
        out.push(*last);
    }

    diagnostics.output_point_count = out.len();
    (out, diagnostics)
}

fn push_corner_arc(out: &mut Vec<Point2>, corner: Point2, fillet: &CornerFillet) {
    // Ceil of a small positive angle; fits comfortably in usize.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = ((fillet.angle * ARC_POINTS_PER_RADIAN).ceil() as usize).max(2);

    out.push(corner.add_vec(fillet.to_prev.mul_scalar(fillet.distance)));
    for j in 1..steps {
        let t = j as f64 / steps as f64;
        let Some(dir) = fillet.to_prev.lerp(fillet.to_next, t).normalized() else {
            continue;
        };
        out.push(corner.add_vec(dir.mul_scalar(fillet.distance)));
    }
    out.push(corner.add_vec(fillet.to_next.mul_scalar(fillet.distance)));
}
