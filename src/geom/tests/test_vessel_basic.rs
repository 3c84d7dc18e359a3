use super::super::*;
use crate::params::{CurveType, GenerationParams};

fn default_points() -> Vec<Point2> {
    vec![
        Point2::new(0.1, 0.0),
        Point2::new(0.22, 0.2),
        Point2::new(0.3, 0.5),
        Point2::new(0.2, 0.8),
        Point2::new(0.3, 1.0),
    ]
}

fn cylinder_points() -> Vec<Point2> {
    vec![Point2::new(0.3, 0.0), Point2::new(0.3, 1.0)]
}

fn polyline(fillet_radius: f64) -> GenerationParams {
    GenerationParams {
        curve_type: CurveType::Polyline,
        fillet_radius,
        ..GenerationParams::default()
    }
}

#[test]
fn default_vessel_is_a_clean_closed_solid() {
    let params = GenerationParams::default();
    let vessel = generate(&default_points(), &params).expect("default vessel");

    let n = params.segments;
    let rings = BASE_RING_COUNT + 2 * (params.height_segments + 1);
    assert_eq!(vessel.ring_size, n);
    assert_eq!(vessel.ring_count, rings);
    assert_eq!(vessel.mesh.vertex_count(), n * rings);
    // One band per adjacent ring pair: 4 base, 2 lower walls, 2 per segment, rim.
    assert_eq!(vessel.mesh.triangle_count(), 2 * n * (7 + 2 * params.height_segments));

    assert!(vessel.mesh.validate().is_ok());
    assert!(vessel.diagnostics.is_clean(), "{}", vessel.diagnostics);
    assert!(vessel.diagnostics.signed_volume > 0.0);
    assert_eq!(vessel.outer_profile.len(), PROFILE_SPLINE_DIVISIONS + 1);
    assert_eq!(vessel.inner_profile.len(), vessel.outer_profile.len());
}

#[test]
fn default_vessel_rests_on_the_ground() {
    let params = GenerationParams::default();
    let vessel = generate(&default_points(), &params).expect("vessel");
    assert!(vessel.bounds.min.y.abs() < 1e-12);
    assert!((vessel.bounds.max.y - 1.0).abs() < 1e-9);
    assert!(vessel.vertical_offset.abs() < 1e-12);

    // The 20-point section reaches x = +-1 on its straight sides, so the
    // widest ring spans exactly the widest profile sample.
    let widest = vessel.outer_profile.max_radius();
    assert!((widest - 0.3).abs() < 1e-12);
    assert!((vessel.bounds.max.x / params.width - widest).abs() < 1e-9);
    assert!((vessel.bounds.min.x / params.width + widest).abs() < 1e-9);

    let [width_mm, height_mm, depth_mm] = vessel.dimensions_mm();
    assert!((height_mm - UNIT_TO_MM).abs() < 1e-6);
    assert!((width_mm - 2.0 * widest * UNIT_TO_MM).abs() < 1e-9, "{width_mm}");
    assert!((width_mm - depth_mm).abs() < 1e-9);
}

#[test]
fn raised_profile_is_lifted_back_to_zero() {
    let points = [Point2::new(0.3, 0.5), Point2::new(0.3, 1.5)];
    let vessel = generate(&points, &polyline(0.0)).expect("vessel");
    assert!((vessel.vertical_offset + 0.5).abs() < 1e-12);
    assert!(vessel.bounds.min.y.abs() < 1e-12);
    assert!((vessel.bounds.max.y - 1.0).abs() < 1e-12);
}

#[test]
fn footprint_follows_width_and_depth() {
    let params = GenerationParams {
        width: 2.0,
        depth: 0.5,
        base_fillet_radius: 0.0,
        segments: 8,
        ..polyline(0.0)
    };
    let vessel = generate(&cylinder_points(), &params).expect("vessel");
    // A sharp square section with 8 points hits its corners at +-1.
    assert!((vessel.bounds.max.x - 0.6).abs() < 1e-9);
    assert!((vessel.bounds.max.z - 0.15).abs() < 1e-9);
    let size = vessel.physical_size(1.0);
    assert!((size.x - 1.2).abs() < 1e-9);
    assert!((size.z - 0.3).abs() < 1e-9);
}

#[test]
fn two_point_polyline_without_fillet_keeps_raw_points() {
    let points = cylinder_points();
    let vessel = generate(&points, &polyline(0.0)).expect("vessel");
    assert_eq!(vessel.outer_profile.points(), points.as_slice());
    assert!(vessel.diagnostics.is_clean(), "{}", vessel.diagnostics);
    assert!(vessel.diagnostics.signed_volume > 0.0);
}

#[test]
fn wall_as_thick_as_the_base_radius_is_rejected() {
    let params = GenerationParams {
        wall_thickness: 0.1,
        ..GenerationParams::default()
    };
    let err = generate(&default_points(), &params).expect_err("degenerate");
    assert!(matches!(err, GenerationError::DegenerateProfile { .. }), "{err}");

    let params = GenerationParams {
        wall_thickness: 0.5,
        ..polyline(0.0)
    };
    assert!(matches!(
        generate(&cylinder_points(), &params),
        Err(GenerationError::DegenerateProfile { .. })
    ));
}

#[test]
fn flat_profile_is_rejected() {
    let points = [Point2::new(0.3, 0.2), Point2::new(0.4, 0.2)];
    assert!(matches!(
        generate(&points, &polyline(0.0)),
        Err(GenerationError::DegenerateProfile { .. })
    ));
}

#[test]
fn too_few_control_points_are_rejected() {
    let err = generate(&[Point2::new(0.3, 0.0)], &GenerationParams::default()).expect_err("spline");
    assert_eq!(
        err,
        GenerationError::InsufficientControlPoints {
            curve_type: CurveType::Spline,
            min: 2,
            count: 1,
        }
    );

    assert!(matches!(
        generate(&[], &polyline(0.0)),
        Err(GenerationError::InsufficientControlPoints { min: 1, count: 0, .. })
    ));
    // A single polyline point is accepted as input but has no height.
    assert!(matches!(
        generate(&[Point2::new(0.3, 0.0)], &polyline(0.0)),
        Err(GenerationError::DegenerateProfile { .. })
    ));
}

#[test]
fn invalid_parameters_are_rejected() {
    let cases = [
        GenerationParams {
            wall_thickness: 0.0,
            ..GenerationParams::default()
        },
        GenerationParams {
            drainage_hole_scale: 1.5,
            ..GenerationParams::default()
        },
        GenerationParams {
            base_fillet_radius: -0.1,
            ..GenerationParams::default()
        },
        GenerationParams {
            height_segments: 0,
            ..GenerationParams::default()
        },
        GenerationParams {
            width: f64::NAN,
            ..GenerationParams::default()
        },
    ];
    for params in cases {
        assert!(
            matches!(
                generate(&default_points(), &params),
                Err(GenerationError::InvalidParameter { .. })
            ),
            "{params:?}"
        );
    }

    let mut points = default_points();
    points[2] = Point2::new(f64::INFINITY, 0.5);
    assert!(matches!(
        generate(&points, &GenerationParams::default()),
        Err(GenerationError::InvalidParameter { name: "control_point", .. })
    ));
}

#[test]
fn huge_segment_counts_are_rejected_without_panicking() {
    let cases = [
        GenerationParams {
            height_segments: usize::MAX,
            ..GenerationParams::default()
        },
        GenerationParams {
            segments: u32::MAX as usize,
            ..GenerationParams::default()
        },
        GenerationParams {
            segments: 100_000,
            height_segments: 100_000,
            ..GenerationParams::default()
        },
    ];
    for params in cases {
        assert!(
            matches!(
                generate(&default_points(), &params),
                Err(GenerationError::InvalidParameter { .. })
            ),
            "{params:?}"
        );
    }

    // Within the vertex budget but beyond what a single outline may hold.
    let params = GenerationParams {
        segments: MAX_CROSS_SECTION_POINTS + 1,
        height_segments: 1,
        ..GenerationParams::default()
    };
    assert_eq!(
        generate(&default_points(), &params),
        Err(GenerationError::InvalidCrossSection {
            count: MAX_CROSS_SECTION_POINTS + 1
        })
    );
}

#[test]
fn too_few_cross_section_points_are_rejected() {
    let params = GenerationParams {
        segments: 2,
        ..GenerationParams::default()
    };
    assert_eq!(
        generate(&default_points(), &params),
        Err(GenerationError::InvalidCrossSection { count: 2 })
    );
}

#[test]
fn closed_drainage_hole_collapses_without_slivers() {
    let params = GenerationParams {
        drainage_hole_scale: 0.0,
        ..GenerationParams::default()
    };
    let vessel = generate(&default_points(), &params).expect("vessel");
    let n = params.segments;

    assert_eq!(vessel.drainage_hole_radius, 0.0);
    assert_eq!(vessel.mesh.vertex_count(), n * vessel.ring_count);
    assert!(vessel.mesh.has_valid_indices());
    // The bore disappears and the two bands around it become fans.
    assert_eq!(vessel.mesh.triangle_count(), 2 * n * (7 + 2 * params.height_segments) - 4 * n);
    assert_eq!(vessel.diagnostics.degenerate_triangle_count, 0);
    assert!(vessel.diagnostics.is_valid_solid(), "{}", vessel.diagnostics);
    assert!(vessel.diagnostics.signed_volume > 0.0);
}

#[test]
fn generation_is_deterministic() {
    let params = polyline(0.1);
    let a = generate(&default_points(), &params).expect("a");
    let b = generate(&default_points(), &params).expect("b");
    assert_eq!(a.mesh, b.mesh);
    assert_eq!(a.outer_profile, b.outer_profile);
    assert_eq!(a.bounds, b.bounds);
}

#[test]
fn context_reuses_cross_sections_and_tracks_offset() {
    let mut ctx = GeomContext::new();
    let params = GenerationParams::default();
    generate_with_context(&default_points(), &params, &mut ctx).expect("first");

    let raised = [Point2::new(0.3, 0.25), Point2::new(0.3, 1.0)];
    let vessel = generate_with_context(&raised, &polyline(0.0), &mut ctx).expect("second");

    let stats = ctx.cache.stats();
    assert_eq!(stats.cross_section_entries, 1);
    assert_eq!(stats.cross_section_hits, 1);
    assert_eq!(ctx.last_vertical_offset, vessel.vertical_offset);
    assert!((ctx.last_vertical_offset + 0.25).abs() < 1e-12);
}
