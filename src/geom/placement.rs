use super::core::{BBox, Point3, Transform, Vec3};
use super::mesh::GeomMesh;

/// Extra footprint factor applied on top of width and depth. The cross
/// section already spans `[-1, 1]`, so no correction is needed.
pub const FOOTPRINT_SCALE: f64 = 1.0;

/// A mesh scaled to its footprint and resting on `y = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMesh {
    pub mesh: GeomMesh,
    pub bounds: BBox,
    /// Vertical translation that was applied.
    pub vertical_offset: f64,
}

/// Scales the footprint by `width` x `depth` and lifts the mesh so its lowest
/// point sits on the ground plane.
///
/// When the mesh has no vertices the bounds collapse to the origin and
/// `fallback_offset` is reported as the offset.
#[must_use]
pub fn place_on_ground(mut mesh: GeomMesh, width: f64, depth: f64, fallback_offset: f64) -> PlacedMesh {
    Transform::scale(width * FOOTPRINT_SCALE, 1.0, depth * FOOTPRINT_SCALE)
        .apply_positions(&mut mesh.positions);

    let Some(raw_bounds) = BBox::from_positions(&mesh.positions) else {
        return PlacedMesh {
            mesh,
            bounds: BBox::new(Point3::default(), Point3::default()),
            vertical_offset: fallback_offset,
        };
    };

    let vertical_offset = -raw_bounds.min.y;
    Transform::translate(Vec3::new(0.0, vertical_offset, 0.0)).apply_positions(&mut mesh.positions);
    let bounds = BBox::from_positions(&mesh.positions).unwrap_or(raw_bounds);

    PlacedMesh {
        mesh,
        bounds,
        vertical_offset,
    }
}
