//! Opt-in timing hooks for vessel generation.
//!
//! Timing is only collected when the `mesh_metrics` feature is enabled and the
//! target is not WASM (`std::time::Instant` is unavailable there). Otherwise
//! every call compiles down to running the closure.
//!
//! ```ignore
//! let mut metrics = GeomMetrics::default();
//! metrics.begin();
//! let curve = metrics.time(TimingBucket::ProfileSampling, || sample_profile(&points, sampling));
//! if let Some(report) = metrics.end() {
//!     println!("profile: {} ns", report.profile_sampling_ns);
//! }
//! ```

/// Generation stages that are timed separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingBucket {
    /// Spline evaluation or polyline filleting of the outer profile.
    ProfileSampling,
    /// Wall-thickness offset of the profile.
    InnerProfile,
    /// Rounded-rectangle outline construction (or cache lookup).
    CrossSection,
    /// Ring placement and stitching.
    MeshBuild,
    /// Footprint scaling and re-anchoring on the ground plane.
    Placement,
    /// Topology and orientation checks.
    Diagnostics,
}

/// Cumulative nanoseconds per stage.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GeomTimingReport {
    pub profile_sampling_ns: u64,
    pub inner_profile_ns: u64,
    pub cross_section_ns: u64,
    pub mesh_build_ns: u64,
    pub placement_ns: u64,
    pub diagnostics_ns: u64,
}

impl GeomTimingReport {
    #[must_use]
    pub fn total_ns(&self) -> u64 {
        self.profile_sampling_ns
            .saturating_add(self.inner_profile_ns)
            .saturating_add(self.cross_section_ns)
            .saturating_add(self.mesh_build_ns)
            .saturating_add(self.placement_ns)
            .saturating_add(self.diagnostics_ns)
    }

    #[must_use]
    pub fn total_ms(&self) -> f64 {
        self.total_ns() as f64 / 1_000_000.0
    }

    fn bucket_mut(&mut self, bucket: TimingBucket) -> &mut u64 {
        match bucket {
            TimingBucket::ProfileSampling => &mut self.profile_sampling_ns,
            TimingBucket::InnerProfile => &mut self.inner_profile_ns,
            TimingBucket::CrossSection => &mut self.cross_section_ns,
            TimingBucket::MeshBuild => &mut self.mesh_build_ns,
            TimingBucket::Placement => &mut self.placement_ns,
            TimingBucket::Diagnostics => &mut self.diagnostics_ns,
        }
    }

    /// Adds `nanos` to `bucket`, saturating at `u64::MAX`.
    pub fn record(&mut self, bucket: TimingBucket, nanos: u64) {
        let slot = self.bucket_mut(bucket);
        *slot = slot.saturating_add(nanos);
    }
}

/// Accumulator for timing generation stages.
///
/// Call [`begin`](Self::begin) to reset, wrap stages with [`time`](Self::time),
/// and call [`end`](Self::end) to retrieve the report.
#[derive(Debug, Default)]
pub struct GeomMetrics {
    #[cfg(all(feature = "mesh_metrics", not(target_arch = "wasm32")))]
    report: GeomTimingReport,
}

impl GeomMetrics {
    pub fn begin(&mut self) {
        #[cfg(all(feature = "mesh_metrics", not(target_arch = "wasm32")))]
        {
            self.report = GeomTimingReport::default();
        }
    }

    /// Returns the accumulated report, or `None` if metrics are disabled.
    #[must_use]
    pub fn end(&self) -> Option<GeomTimingReport> {
        #[cfg(all(feature = "mesh_metrics", not(target_arch = "wasm32")))]
        {
            Some(self.report.clone())
        }
        #[cfg(not(all(feature = "mesh_metrics", not(target_arch = "wasm32"))))]
        {
            None
        }
    }

    /// Runs `f`, adding its elapsed time to `bucket` when metrics are enabled.
    pub fn time<R>(&mut self, bucket: TimingBucket, f: impl FnOnce() -> R) -> R {
        #[cfg(all(feature = "mesh_metrics", not(target_arch = "wasm32")))]
        {
            let start = std::time::Instant::now();
            let result = f();
            let nanos = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);
            self.report.record(bucket, nanos);
            result
        }

        #[cfg(not(all(feature = "mesh_metrics", not(target_arch = "wasm32"))))]
        {
            let _ = bucket;
            f()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_report_total() {
        let mut report = GeomTimingReport::default();
        report.record(TimingBucket::MeshBuild, 1000);
        report.record(TimingBucket::ProfileSampling, 2000);
        report.record(TimingBucket::MeshBuild, 3000);
        assert_eq!(report.mesh_build_ns, 4000);
        assert_eq!(report.total_ns(), 6000);
        assert!((report.total_ms() - 0.006).abs() < 1e-9);
    }

    #[test]
    fn test_record_saturates() {
        let mut report = GeomTimingReport::default();
        report.record(TimingBucket::Placement, u64::MAX);
        report.record(TimingBucket::Placement, 10);
        assert_eq!(report.placement_ns, u64::MAX);
    }

    #[test]
    fn test_time_returns_closure_result() {
        let mut metrics = GeomMetrics::default();
        metrics.begin();
        let result = metrics.time(TimingBucket::Diagnostics, || 42);
        assert_eq!(result, 42);
        let report = metrics.end();
        #[cfg(all(feature = "mesh_metrics", not(target_arch = "wasm32")))]
        assert!(report.is_some());
        #[cfg(not(all(feature = "mesh_metrics", not(target_arch = "wasm32"))))]
        assert!(report.is_none());
    }
}
