use super::super::*;
use crate::params::GenerationParams;

fn points() -> Vec<Point2> {
    vec![Point2::new(0.3, 0.0), Point2::new(0.35, 0.6), Point2::new(0.3, 1.0)]
}

#[test]
fn memo_returns_the_same_vessel_for_the_same_inputs() {
    let mut memo = VesselMemo::default();
    let params = GenerationParams::default();

    let first = memo
        .get_or_try_insert(&points(), &params, || generate(&points(), &params))
        .expect("first");
    let second = memo
        .get_or_try_insert(&points(), &params, || -> Result<VesselMesh, GenerationError> {
            panic!("memo should not regenerate")
        })
        .expect("second");

    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(memo.hits(), 1);
    assert_eq!(memo.misses(), 1);
    assert_eq!(memo.len(), 1);
}

#[test]
fn memo_does_not_store_failures() {
    let mut memo = VesselMemo::default();
    let params = GenerationParams {
        wall_thickness: 0.5,
        ..GenerationParams::default()
    };
    let result = memo.get_or_try_insert(&points(), &params, || generate(&points(), &params));
    assert!(matches!(result, Err(GenerationError::DegenerateProfile { .. })));
    assert!(memo.is_empty());
    assert!(memo.get(&points(), &params).is_none());
}

#[test]
fn memo_evicts_the_oldest_entry() {
    let mut memo = VesselMemo::with_capacity(2);
    let base = GenerationParams::default();
    let variants: Vec<GenerationParams> = [20, 24, 28]
        .into_iter()
        .map(|segments| GenerationParams { segments, ..base })
        .collect();
    for params in &variants {
        memo.get_or_try_insert(&points(), params, || generate(&points(), params))
            .expect("vessel");
    }

    assert_eq!(memo.len(), 2);
    assert!(memo.get(&points(), &variants[0]).is_none());
    assert!(memo.get(&points(), &variants[1]).is_some());
    assert_eq!(memo.get(&points(), &variants[2]).map(|v| v.ring_size), Some(28));

    memo.clear();
    assert!(memo.is_empty());
}

#[test]
fn dragging_the_base_fillet_keeps_the_context_cache_bounded() {
    let mut ctx = GeomContext::new();
    let points = points();
    for tick in 0..=100 {
        let params = GenerationParams {
            base_fillet_radius: f64::from(tick) / 100.0,
            height_segments: 4,
            ..GenerationParams::default()
        };
        generate_with_context(&points, &params, &mut ctx).expect("vessel");
        assert!(ctx.cache.stats().cross_section_entries <= ctx.cache.capacity());
    }

    let stats = ctx.cache.stats();
    assert_eq!(stats.cross_section_entries, DEFAULT_CROSS_SECTION_CAPACITY);
    assert_eq!(stats.cross_section_misses, 101);
}
