use super::super::*;
use crate::params::{CurveType, GenerationParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Control points with increasing heights, the first resting on `y = 0`.
fn random_points(rng: &mut StdRng) -> Vec<Point2> {
    let count = rng.random_range(2..=10);
    let mut y = 0.0;
    (0..count)
        .map(|i| {
            if i > 0 {
                y += rng.random_range(0.05..0.4);
            }
            Point2::new(rng.random_range(0.12..0.6), y)
        })
        .collect()
}

fn random_params(rng: &mut StdRng) -> GenerationParams {
    GenerationParams {
        width: rng.random_range(0.5..2.0),
        depth: rng.random_range(0.5..2.0),
        base_fillet_radius: rng.random_range(0.0..=1.0),
        curve_type: if rng.random_bool(0.5) {
            CurveType::Spline
        } else {
            CurveType::Polyline
        },
        tension: rng.random_range(0.0..1.0),
        fillet_radius: rng.random_range(0.0..0.3),
        segments: rng.random_range(3..40),
        height_segments: rng.random_range(1..40),
        wall_thickness: rng.random_range(0.01..0.08),
        drainage_hole_scale: rng.random_range(0.0..0.95),
    }
}

#[test]
fn random_vessels_are_closed_or_rejected() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut built = 0;
    for _ in 0..200 {
        let points = random_points(&mut rng);
        let params = random_params(&mut rng);
        match generate(&points, &params) {
            Ok(vessel) => {
                built += 1;
                let mesh = &vessel.mesh;
                assert!(mesh.validate().is_ok(), "{params:?}");
                assert_eq!(mesh.vertex_count(), params.segments * vessel.ring_count);
                assert_eq!(
                    vessel.ring_count,
                    BASE_RING_COUNT + 2 * (params.height_segments + 1)
                );
                assert!(vessel.diagnostics.is_valid_solid(), "{}", vessel.diagnostics);
                assert!(vessel.bounds.min.y.abs() < 1e-9);
            }
            Err(GenerationError::DegenerateProfile { .. }) => {}
            Err(other) => panic!("unexpected error {other} for {params:?}"),
        }
    }
    assert!(built > 50, "only {built} vessels were built");
}

#[test]
fn radius_lookup_is_idempotent_under_clamping() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let points = random_points(&mut rng);
        let sampling = ProfileSampling {
            curve_type: CurveType::Spline,
            tension: 0.5,
            fillet_radius: 0.0,
            width: 1.0,
        };
        let (curve, _) = sample_profile(&points, sampling);
        let (Some(lo), Some(hi)) = (curve.min_height(), curve.max_height()) else {
            panic!("empty curve");
        };
        for _ in 0..20 {
            let y = rng.random_range(lo - 1.0..hi + 1.0);
            let clamped = y.clamp(lo, hi);
            assert_eq!(curve.radius_at(y), curve.radius_at(clamped));
        }
    }
}

#[test]
fn resampling_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    for curve_type in [CurveType::Spline, CurveType::Polyline] {
        let points = random_points(&mut rng);
        let sampling = ProfileSampling {
            curve_type,
            tension: 0.5,
            fillet_radius: 0.1,
            width: 1.3,
        };
        let (a, diag_a) = sample_profile(&points, sampling);
        let (b, diag_b) = sample_profile(&points, sampling);
        assert_eq!(a, b);
        assert_eq!(diag_a, diag_b);
    }
}

#[test]
fn fillets_never_consume_more_than_half_an_edge() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..100 {
        let prev = Point2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
        let corner = Point2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
        let next = Point2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
        let radius = rng.random_range(0.0..5.0);
        if let Some(fillet) = corner_fillet(prev, corner, next, radius) {
            let shorter = prev.distance_to(corner).min(next.distance_to(corner));
            assert!(fillet.distance <= FILLET_EDGE_SHARE * shorter + 1e-12);
            assert!(fillet.distance.is_finite());
        }
    }
}

#[test]
fn walls_keep_their_thickness_on_non_flaring_bases() {
    // Cylinders and inward tapers: the outer radius never grows inside the slab.
    let shapes: [&[Point2]; 3] = [
        &[Point2::new(0.3, 0.0), Point2::new(0.3, 1.0)],
        &[Point2::new(0.4, 0.0), Point2::new(0.25, 1.2)],
        &[Point2::new(0.35, 0.0), Point2::new(0.35, 0.3), Point2::new(0.5, 1.0)],
    ];
    let params = GenerationParams {
        curve_type: CurveType::Polyline,
        fillet_radius: 0.0,
        ..GenerationParams::default()
    };
    let t = params.wall_thickness;

    for points in shapes {
        let vessel = generate(points, &params).expect("vessel");
        let outer = &vessel.outer_profile;
        let inner = &vessel.inner_profile;
        let (Some(lo), Some(hi)) = (outer.min_height(), outer.max_height()) else {
            panic!("empty profile");
        };
        let hole = vessel.drainage_hole_radius;
        assert!(hole >= 0.0);
        for i in 0..=params.height_segments {
            let y = lo + t + (i as f64 / params.height_segments as f64) * (hi - lo - t);
            let r_out = outer.radius_at(y);
            let r_in = inner.radius_at(y);
            assert!(r_in >= hole, "inner {r_in} inside hole {hole}");
            assert!(r_out >= r_in + t - 1e-9, "wall at {y}: {r_out} vs {r_in}");
        }
        assert!(vessel.diagnostics.is_clean(), "{}", vessel.diagnostics);
    }
}

#[test]
fn flaring_default_profile_keeps_its_wall_above_the_floor() {
    // The default profile widens from 0.1 at the base, so the inner curve
    // interpolates across the floor edge. Every slice above it keeps the wall.
    let points = [
        Point2::new(0.1, 0.0),
        Point2::new(0.22, 0.2),
        Point2::new(0.3, 0.5),
        Point2::new(0.2, 0.8),
        Point2::new(0.3, 1.0),
    ];
    let params = GenerationParams::default();
    let t = params.wall_thickness;
    let vessel = generate(&points, &params).expect("vessel");
    let outer = &vessel.outer_profile;
    let inner = &vessel.inner_profile;
    let (Some(lo), Some(hi)) = (outer.min_height(), outer.max_height()) else {
        panic!("empty profile");
    };
    assert!(outer.radius_at(lo + t) > outer.radius_at(lo), "profile should flare");

    let h = params.height_segments;
    for i in 1..=h {
        let y = lo + t + (i as f64 / h as f64) * (hi - lo - t);
        let r_out = outer.radius_at(y);
        let r_in = inner.radius_at(y);
        assert!(r_in >= vessel.drainage_hole_radius);
        assert!(r_out >= r_in + t - 1e-9, "wall at {y}: {r_out} vs {r_in}");
    }
}
