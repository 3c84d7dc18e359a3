mod cache;
mod core;
mod cross_section;
mod diagnostics;
mod fillet;
mod mesh;
mod metrics;
mod placement;
mod profile;
mod revolve;
mod spline;
mod vessel;

pub mod export;

pub use cache::{
    DEFAULT_CROSS_SECTION_CAPACITY, DEFAULT_MEMO_CAPACITY, GeomCache, GeomCacheStats, VesselMemo,
    content_hash,
};
pub use core::{BBox, Point2, Point3, Tolerance, Transform, Vec2, Vec3};
pub use cross_section::{CrossSection, MAX_CROSS_SECTION_POINTS, MIN_CROSS_SECTION_POINTS};
pub use diagnostics::GeomMeshDiagnostics;
pub use export::{ExportError, ExportTransform, obj_string, write_obj};
pub use fillet::{
    CornerFillet, FILLET_EDGE_SHARE, FilletPolylineDiagnostics, MIN_FILLET_RADIUS, corner_fillet,
    fillet_polyline_corners,
};
pub use mesh::{GeomContext, GeomMesh};
pub use metrics::{GeomMetrics, GeomTimingReport, TimingBucket};
pub use placement::{FOOTPRINT_SCALE, PlacedMesh, place_on_ground};
pub use profile::{
    MIN_INNER_RADIUS, ProfileCurve, ProfileSampleDiagnostics, ProfileSampling,
    derive_inner_profile, sample_profile,
};
pub use revolve::{
    BASE_RING_COUNT, MAX_VERTEX_COUNT, RevolveSettings, VesselLayout, build_vessel_mesh,
    vessel_vertex_count,
};
pub(crate) use revolve::checked_vertex_count;
pub use spline::{CatmullRomCurve2, PROFILE_SPLINE_DIVISIONS};
pub use vessel::{GenerationError, UNIT_TO_MM, VesselMesh, generate, generate_with_context};

#[cfg(test)]
mod tests;
