//! Ring stacking for a thick-walled vessel of revolution.
//!
//! Every ring is the shared cross-section scaled by a radius and lifted to a
//! height. Rings are laid out in a fixed order so stitching is plain index
//! arithmetic:
//!
//! | ring | role                 | height             | radius          |
//! |------|----------------------|--------------------|-----------------|
//! | 0    | outer bottom         | `min_y`            | outer base      |
//! | 1    | inner bottom         | `min_y`            | cavity floor    |
//! | 2    | drainage hole bottom | `min_y`            | floor * scale   |
//! | 3    | drainage hole top    | `min_y + t / 2`    | floor * scale   |
//! | 4    | inner top (floor)    | `min_y + t`        | cavity floor    |
//! | 5+2i | outer wall slice i   | `min_y + t + ...`  | outer profile   |
//! | 6+2i | inner wall slice i   | same as 5+2i       | inner profile   |
//!
//! Rings 4 and 6 share a height. When their radii also match, ring 6 is left
//! unreferenced and the inner wall starts from ring 4 instead, so the flat band
//! between them does not turn into zero-area triangles.

use super::core::Tolerance;
use super::cross_section::{CrossSection, MIN_CROSS_SECTION_POINTS};
use super::mesh::GeomMesh;
use super::profile::ProfileCurve;
use super::vessel::GenerationError;

/// Number of rings that make up the base slab and drainage hole.
pub const BASE_RING_COUNT: usize = 5;

/// Largest vertex buffer a vessel may request (`2^24` vertices).
pub const MAX_VERTEX_COUNT: usize = 1 << 24;

const OUTER_BOTTOM: usize = 0;
const INNER_BOTTOM: usize = 1;
const HOLE_BOTTOM: usize = 2;
const HOLE_TOP: usize = 3;
const INNER_TOP: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevolveSettings {
    pub wall_thickness: f64,
    pub drainage_hole_scale: f64,
    pub height_segments: usize,
    pub tolerance: Tolerance,
}

/// Shape of the ring stack that was built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VesselLayout {
    /// Vertices per ring (the cross-section point count).
    pub ring_size: usize,
    pub ring_count: usize,
    pub drainage_hole_radius: f64,
    /// The hole radius was zero, so rings 2 and 3 sit on the axis.
    pub hole_collapsed: bool,
    /// The first inner wall ring coincides with the cavity floor ring.
    pub floor_merged: bool,
}

/// Triangle orientation of a band between two rings.
///
/// `Forward` emits `(a_j, a_j+1, b_j)` and `(a_j+1, b_j+1, b_j)`; `Reversed`
/// flips both triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Winding {
    Forward,
    Reversed,
}

#[derive(Debug, Clone, Copy)]
struct Ring {
    start: u32,
    collapsed: bool,
}

impl Ring {
    /// Collapsed rings funnel every slot to their first vertex.
    fn vertex(self, j: u32) -> u32 {
        if self.collapsed { self.start } else { self.start + j }
    }
}

/// Builds the raw (un-placed) vessel mesh from a cross-section and the
/// outer/inner profile curves.
///
/// Fails with [`GenerationError::DegenerateProfile`] when the profile cannot
/// hold a wall of the requested thickness and with
/// [`GenerationError::InvalidParameter`] when the vertex count would exceed
/// [`MAX_VERTEX_COUNT`]. Never emits out-of-range indices.
pub fn build_vessel_mesh(
    section: &CrossSection,
    outer: &ProfileCurve,
    inner: &ProfileCurve,
    settings: &RevolveSettings,
) -> Result<(GeomMesh, VesselLayout), GenerationError> {
    let n = section.len();
    if n < MIN_CROSS_SECTION_POINTS {
        return Err(GenerationError::InvalidCrossSection { count: n });
    }
    if settings.height_segments < 1 {
        return Err(GenerationError::InvalidParameter {
            name: "height_segments",
            value: settings.height_segments as f64,
            expected: "at least 1",
        });
    }

    let vertex_count = checked_vertex_count(n, settings.height_segments)?;
    let n_u32 = u32::try_from(n).map_err(|_| too_many_vertices(vertex_count))?;

    let rings = plan_rings(outer, inner, settings)?;
    let ring_count = rings.specs.len();

    let mut positions = Vec::with_capacity(vertex_count);
    for spec in &rings.specs {
        for p in section.points() {
            positions.push([p.x * spec.radius, spec.height, p.y * spec.radius]);
        }
    }

    let ring = |k: usize| Ring {
        // k * n < vertex_count, which fits u32 (checked above)
        start: (k as u32) * n_u32,
        collapsed: (k == HOLE_BOTTOM || k == HOLE_TOP) && rings.hole_collapsed,
    };

    let mut indices = Vec::with_capacity(vertex_count * 6);

    // Base slab: bottom face, bore, cavity floor.
    stitch(&mut indices, n_u32, ring(OUTER_BOTTOM), ring(INNER_BOTTOM), Winding::Reversed);
    stitch(&mut indices, n_u32, ring(INNER_BOTTOM), ring(HOLE_BOTTOM), Winding::Reversed);
    stitch(&mut indices, n_u32, ring(HOLE_BOTTOM), ring(HOLE_TOP), Winding::Reversed);
    stitch(&mut indices, n_u32, ring(HOLE_TOP), ring(INNER_TOP), Winding::Reversed);

    // Lower walls joining the slab to the first slice.
    let outer_slice = |i: usize| ring(BASE_RING_COUNT + 2 * i);
    let inner_slice = |i: usize| {
        if i == 0 && rings.floor_merged {
            ring(INNER_TOP)
        } else {
            ring(BASE_RING_COUNT + 2 * i + 1)
        }
    };
    stitch(&mut indices, n_u32, ring(OUTER_BOTTOM), outer_slice(0), Winding::Forward);
    if !rings.floor_merged {
        stitch(&mut indices, n_u32, ring(INNER_TOP), inner_slice(0), Winding::Reversed);
    }

    for i in 0..settings.height_segments {
        stitch(&mut indices, n_u32, outer_slice(i), outer_slice(i + 1), Winding::Forward);
        stitch(&mut indices, n_u32, inner_slice(i), inner_slice(i + 1), Winding::Reversed);
    }

    // Rim.
    let last = settings.height_segments;
    stitch(&mut indices, n_u32, outer_slice(last), inner_slice(last), Winding::Forward);

    let layout = VesselLayout {
        ring_size: n,
        ring_count,
        drainage_hole_radius: rings.hole_radius,
        hole_collapsed: rings.hole_collapsed,
        floor_merged: rings.floor_merged,
    };
    Ok((GeomMesh::new(positions, indices), layout))
}

#[derive(Debug, Clone, Copy)]
struct RingSpec {
    height: f64,
    radius: f64,
}

struct RingPlan {
    specs: Vec<RingSpec>,
    hole_radius: f64,
    hole_collapsed: bool,
    floor_merged: bool,
}

fn plan_rings(
    outer: &ProfileCurve,
    inner: &ProfileCurve,
    settings: &RevolveSettings,
) -> Result<RingPlan, GenerationError> {
    if outer.len() < 2 || inner.len() < 2 {
        return Err(degenerate(format!(
            "profile has {} samples, at least 2 are required",
            outer.len().min(inner.len())
        )));
    }
    let (Some(min_y), Some(max_y)) = (outer.min_height(), outer.max_height()) else {
        return Err(degenerate("profile is empty".to_owned()));
    };

    let t = settings.wall_thickness;
    let height = max_y - min_y;
    if !(height.is_finite() && height > 0.0) {
        return Err(degenerate(format!("profile height is {height}")));
    }
    if height <= t {
        return Err(degenerate(format!(
            "wall thickness {t} is not smaller than the vessel height {height}"
        )));
    }

    let outer_base = outer.radius_at(min_y);
    if outer_base <= t {
        return Err(degenerate(format!(
            "wall thickness {t} consumes the base radius {outer_base}"
        )));
    }
    let floor = inner.radius_at(min_y);
    if floor >= outer_base {
        return Err(degenerate(format!(
            "cavity floor radius {floor} reaches the outer base radius {outer_base}"
        )));
    }

    let scale = settings.drainage_hole_scale.clamp(0.0, 1.0);
    let hole_radius = floor * scale;
    let hole_collapsed = settings.tolerance.approx_zero_f64(hole_radius);
    if !hole_collapsed && hole_radius >= floor - settings.tolerance.eps {
        return Err(degenerate(format!(
            "drainage hole radius {hole_radius} removes the cavity floor {floor}"
        )));
    }

    let h = settings.height_segments;
    let mut specs = Vec::with_capacity(BASE_RING_COUNT + 2 * (h + 1));
    specs.push(RingSpec { height: min_y, radius: outer_base });
    specs.push(RingSpec { height: min_y, radius: floor });
    specs.push(RingSpec { height: min_y, radius: hole_radius });
    specs.push(RingSpec { height: min_y + t * 0.5, radius: hole_radius });
    specs.push(RingSpec { height: min_y + t, radius: floor });

    let wall_span = height - t;
    for i in 0..=h {
        let y = min_y + t + (i as f64 / h as f64) * wall_span;
        let r_out = outer.radius_at(y);
        let r_in = inner.radius_at(y);
        if r_out <= r_in {
            return Err(degenerate(format!(
                "inner radius {r_in} meets the outer radius {r_out} at height {y}"
            )));
        }
        if r_in <= hole_radius {
            return Err(degenerate(format!(
                "inner radius {r_in} at height {y} is inside the drainage hole {hole_radius}"
            )));
        }
        specs.push(RingSpec { height: y, radius: r_out });
        specs.push(RingSpec { height: y, radius: r_in });
    }

    // specs[INNER_TOP + 2] is the first inner wall ring.
    let floor_merged = settings
        .tolerance
        .approx_eq_f64(specs[INNER_TOP + 2].radius, floor);

    Ok(RingPlan {
        specs,
        hole_radius,
        hole_collapsed,
        floor_merged,
    })
}

fn stitch(indices: &mut Vec<u32>, n: u32, a: Ring, b: Ring, winding: Winding) {
    for j in 0..n {
        let nj = (j + 1) % n;
        let (a_j, a_nj) = (a.vertex(j), a.vertex(nj));
        let (b_j, b_nj) = (b.vertex(j), b.vertex(nj));

        // A collapsed ring turns its quad half into a sliver; skip it.
        if !a.collapsed {
            push_triangle(indices, [a_j, a_nj, b_j], winding);
        }
        if !b.collapsed {
            push_triangle(indices, [a_nj, b_nj, b_j], winding);
        }
    }
}

fn push_triangle(indices: &mut Vec<u32>, [i0, i1, i2]: [u32; 3], winding: Winding) {
    match winding {
        Winding::Forward => indices.extend_from_slice(&[i0, i1, i2]),
        Winding::Reversed => indices.extend_from_slice(&[i0, i2, i1]),
    }
}

fn degenerate(reason: String) -> GenerationError {
    GenerationError::DegenerateProfile { reason }
}

/// Vertices in a vessel with `ring_size` points per ring and
/// `height_segments` wall segments, or `None` on overflow.
#[must_use]
pub fn vessel_vertex_count(ring_size: usize, height_segments: usize) -> Option<usize> {
    height_segments
        .checked_add(1)?
        .checked_mul(2)?
        .checked_add(BASE_RING_COUNT)?
        .checked_mul(ring_size)
}

/// [`vessel_vertex_count`], rejected above [`MAX_VERTEX_COUNT`].
pub(crate) fn checked_vertex_count(
    ring_size: usize,
    height_segments: usize,
) -> Result<usize, GenerationError> {
    vessel_vertex_count(ring_size, height_segments)
        .filter(|&count| count <= MAX_VERTEX_COUNT)
        .ok_or(GenerationError::InvalidParameter {
            name: "height_segments",
            value: height_segments as f64,
            expected: "a vertex count (segments x rings) of at most 2^24",
        })
}

fn too_many_vertices(count: usize) -> GenerationError {
    GenerationError::InvalidParameter {
        name: "height_segments",
        value: count as f64,
        expected: "a vertex count addressable by 32-bit indices",
    }
}
