//! Vessel generation entry point: control points and parameters in, placed
//! watertight mesh out.

use super::core::{BBox, Point2, Vec3};
use super::cross_section::CrossSection;
use super::diagnostics::GeomMeshDiagnostics;
use super::mesh::{GeomContext, GeomMesh};
use super::metrics::TimingBucket;
use super::placement::place_on_ground;
use super::profile::{
    MIN_INNER_RADIUS, ProfileCurve, ProfileSampling, derive_inner_profile, sample_profile,
};
use super::revolve::{RevolveSettings, build_vessel_mesh};
use crate::params::{CurveType, GenerationParams};

/// Millimetres per model unit, used for the dimension read-out and export.
pub const UNIT_TO_MM: f64 = 50.0;

/// Half-extent of the cross-section in both directions; the footprint is
/// scaled to width and depth afterwards.
const CROSS_SECTION_HALF_EXTENT: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("{curve_type} profile needs at least {min} control points, got {count}")]
    InsufficientControlPoints {
        curve_type: CurveType,
        min: usize,
        count: usize,
    },
    #[error("degenerate profile: {reason}")]
    DegenerateProfile { reason: String },
    #[error("cross-section needs between 3 and 65536 points, got {count}")]
    InvalidCrossSection { count: usize },
    #[error("invalid `{name}` = {value}: expected {expected}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// A generated vessel together with the curves and layout it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselMesh {
    /// Final mesh, scaled to the footprint and resting on `y = 0`.
    pub mesh: GeomMesh,
    pub bounds: BBox,
    /// Translation along Y that lifted the raw mesh onto the ground plane.
    pub vertical_offset: f64,
    /// Vertices per ring.
    pub ring_size: usize,
    pub ring_count: usize,
    /// Radius of the drainage hole, normalised like the profiles.
    pub drainage_hole_radius: f64,
    pub outer_profile: ProfileCurve,
    pub inner_profile: ProfileCurve,
    pub diagnostics: GeomMeshDiagnostics,
}

impl VesselMesh {
    /// Bounding-box extents multiplied by `unit_scale`.
    #[must_use]
    pub fn physical_size(&self, unit_scale: f64) -> Vec3 {
        self.bounds.size().mul_scalar(unit_scale)
    }

    /// `[width, height, depth]` in millimetres.
    #[must_use]
    pub fn dimensions_mm(&self) -> [f64; 3] {
        self.physical_size(UNIT_TO_MM).to_array()
    }
}

/// Generates a vessel with a throwaway context.
///
/// # Errors
///
/// See [`generate_with_context`].
pub fn generate(
    control_points: &[Point2],
    params: &GenerationParams,
) -> Result<VesselMesh, GenerationError> {
    let mut ctx = GeomContext::new();
    generate_with_context(control_points, params, &mut ctx)
}

/// Generates a vessel, reusing the cross-section cache in `ctx` and recording
/// per-stage timing when metrics are enabled.
///
/// # Errors
///
/// Returns [`GenerationError::InvalidParameter`] for out-of-range parameters or
/// non-finite control points, [`GenerationError::InsufficientControlPoints`]
/// when the curve type cannot build a profile, and
/// [`GenerationError::DegenerateProfile`] when the wall does not fit the shape.
pub fn generate_with_context(
    control_points: &[Point2],
    params: &GenerationParams,
    ctx: &mut GeomContext,
) -> Result<VesselMesh, GenerationError> {
    params.validate()?;
    if let Some(p) = control_points.iter().find(|p| !p.is_finite()) {
        return Err(GenerationError::InvalidParameter {
            name: "control_point",
            value: if p.x.is_finite() { p.y } else { p.x },
            expected: "finite coordinates",
        });
    }
    let min = params.curve_type.min_control_points();
    if control_points.len() < min {
        return Err(GenerationError::InsufficientControlPoints {
            curve_type: params.curve_type,
            min,
            count: control_points.len(),
        });
    }

    ctx.metrics.begin();

    let sampling = ProfileSampling {
        curve_type: params.curve_type,
        tension: params.tension,
        fillet_radius: params.fillet_radius,
        width: params.width,
    };
    let (outer, sample_diag) = ctx
        .metrics
        .time(TimingBucket::ProfileSampling, || sample_profile(control_points, sampling));
    log::debug!(
        "profile: {} control points -> {} samples ({})",
        sample_diag.control_point_count,
        sample_diag.sample_count,
        params.curve_type
    );
    if let Some(fillet) = &sample_diag.fillet {
        log::debug!(
            "fillet: {} corners, {} rounded, {} skipped, {} clamped",
            fillet.corner_count,
            fillet.filleted_corner_count,
            fillet.skipped_corner_count,
            fillet.clamped_corner_count
        );
    }

    let inner = ctx.metrics.time(TimingBucket::InnerProfile, || {
        derive_inner_profile(&outer, params.wall_thickness, MIN_INNER_RADIUS)
    });

    let cache = &mut ctx.cache;
    let section = ctx.metrics.time(TimingBucket::CrossSection, || {
        cache.get_or_try_insert_cross_section(
            CROSS_SECTION_HALF_EXTENT,
            CROSS_SECTION_HALF_EXTENT,
            params.base_fillet_radius,
            params.segments,
            || {
                CrossSection::rounded_rectangle(
                    CROSS_SECTION_HALF_EXTENT,
                    CROSS_SECTION_HALF_EXTENT,
                    params.base_fillet_radius,
                    params.segments,
                )
            },
        )
    })?;

    let settings = RevolveSettings {
        wall_thickness: params.wall_thickness,
        drainage_hole_scale: params.drainage_hole_scale,
        height_segments: params.height_segments,
        tolerance: ctx.tolerance,
    };
    let (raw, layout) = ctx.metrics.time(TimingBucket::MeshBuild, || {
        build_vessel_mesh(&section, &outer, &inner, &settings)
    })?;
    if layout.hole_collapsed {
        log::debug!("drainage hole collapsed to the axis");
    }

    let fallback_offset = ctx.last_vertical_offset;
    let placed = ctx.metrics.time(TimingBucket::Placement, || {
        place_on_ground(raw, params.width, params.depth, fallback_offset)
    });
    ctx.last_vertical_offset = placed.vertical_offset;

    let tolerance = ctx.tolerance;
    let mut diagnostics = ctx.metrics.time(TimingBucket::Diagnostics, || {
        GeomMeshDiagnostics::analyze(&placed.mesh, tolerance)
    });
    diagnostics.timing = ctx.metrics.end();

    if diagnostics.is_valid_solid() {
        log::debug!("vessel: {}", diagnostics.summary());
    } else {
        log::warn!("vessel mesh is not a closed solid: {}", diagnostics.summary());
    }

    Ok(VesselMesh {
        mesh: placed.mesh,
        bounds: placed.bounds,
        vertical_offset: placed.vertical_offset,
        ring_size: layout.ring_size,
        ring_count: layout.ring_count,
        drainage_hole_radius: layout.drainage_hole_radius,
        outer_profile: outer,
        inner_profile: inner,
        diagnostics,
    })
}
