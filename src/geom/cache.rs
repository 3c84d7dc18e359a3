//! Reuse of intermediate and final generation results.
//!
//! Two layers are provided:
//! - [`GeomCache`] keeps the most recent cross-section outlines, which only
//!   depend on the corner fillet fraction and the point count and are shared
//!   by every ring of every regeneration while a slider other than those two
//!   is dragged.
//! - [`VesselMemo`] keeps whole generated vessels keyed by a content hash of
//!   the control points and parameters, bounded to a fixed number of entries.
//!
//! # Example
//! ```ignore
//! let mut cache = GeomCache::default();
//! let section = cache.get_or_try_insert_cross_section(1.0, 1.0, 0.8, 20, || {
//!     CrossSection::rounded_rectangle(1.0, 1.0, 0.8, 20)
//! })?;
//! let stats = cache.stats();
//! println!("entries: {}, hits: {}", stats.cross_section_entries, stats.cross_section_hits);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::core::Point2;
use super::cross_section::CrossSection;
use super::vessel::VesselMesh;
use crate::params::{GenerationParams, hash_bits};

/// Number of generated vessels a [`VesselMemo`] keeps by default.
pub const DEFAULT_MEMO_CAPACITY: usize = 32;

/// Number of cross-section outlines a [`GeomCache`] keeps by default.
pub const DEFAULT_CROSS_SECTION_CAPACITY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CrossSectionKey {
    half_width_bits: u64,
    half_depth_bits: u64,
    fillet_bits: u64,
    segments: usize,
}

impl CrossSectionKey {
    fn new(half_width: f64, half_depth: f64, fillet_fraction: f64, segments: usize) -> Self {
        Self {
            half_width_bits: half_width.to_bits(),
            half_depth_bits: half_depth.to_bits(),
            fillet_bits: fillet_fraction.to_bits(),
            segments,
        }
    }
}

/// Bounded cache of cross-section outlines, evicting the oldest entry first.
#[derive(Debug)]
pub struct GeomCache {
    cross_sections: HashMap<CrossSectionKey, Arc<CrossSection>>,
    order: VecDeque<CrossSectionKey>,
    capacity: usize,
    cross_section_hits: usize,
    cross_section_misses: usize,
}

/// Cache statistics for diagnostics and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeomCacheStats {
    pub cross_section_entries: usize,
    pub cross_section_hits: usize,
    pub cross_section_misses: usize,
    /// Estimated memory usage of the cached points in bytes.
    pub estimated_memory_bytes: usize,
}

impl GeomCacheStats {
    /// Returns the cache hit rate as a value between 0.0 and 1.0.
    /// Returns 0.0 if no cache accesses have been made.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.cross_section_hits + self.cross_section_misses;
        if total == 0 {
            0.0
        } else {
            self.cross_section_hits as f64 / total as f64
        }
    }
}

impl GeomCache {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CROSS_SECTION_CAPACITY)
    }

    /// A cache holding at most `capacity` outlines (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            cross_sections: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
            cross_section_hits: 0,
            cross_section_misses: 0,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the cached outline for these inputs, building it with `make`
    /// on a miss. Failed builds are not cached.
    pub fn get_or_try_insert_cross_section<E>(
        &mut self,
        half_width: f64,
        half_depth: f64,
        fillet_fraction: f64,
        segments: usize,
        make: impl FnOnce() -> Result<CrossSection, E>,
    ) -> Result<Arc<CrossSection>, E> {
        let key = CrossSectionKey::new(half_width, half_depth, fillet_fraction, segments);
        if let Some(section) = self.cross_sections.get(&key) {
            self.cross_section_hits += 1;
            return Ok(Arc::clone(section));
        }

        self.cross_section_misses += 1;
        let section = Arc::new(make()?);
        while self.cross_sections.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.cross_sections.remove(&oldest);
                }
                None => break,
            }
        }
        self.cross_sections.insert(key, Arc::clone(&section));
        self.order.push_back(key);
        Ok(section)
    }

    #[must_use]
    pub fn stats(&self) -> GeomCacheStats {
        let estimated_memory_bytes = self
            .cross_sections
            .values()
            .map(|section| section.len() * std::mem::size_of::<Point2>())
            .sum();
        GeomCacheStats {
            cross_section_entries: self.cross_sections.len(),
            cross_section_hits: self.cross_section_hits,
            cross_section_misses: self.cross_section_misses,
            estimated_memory_bytes,
        }
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&mut self) {
        self.cross_sections.clear();
        self.order.clear();
        self.cross_section_hits = 0;
        self.cross_section_misses = 0;
    }
}

/// Hash of everything that determines a generated vessel.
///
/// Equal inputs (with `-0.0 == 0.0`) hash alike.
#[must_use]
pub fn content_hash(control_points: &[Point2], params: &GenerationParams) -> u64 {
    let mut hasher = DefaultHasher::new();
    control_points.len().hash(&mut hasher);
    for p in control_points {
        hash_bits(p.x).hash(&mut hasher);
        hash_bits(p.y).hash(&mut hasher);
    }
    params.hash(&mut hasher);
    hasher.finish()
}

/// The inputs a memoised vessel was generated from, compared on every hit so
/// that a hash collision regenerates instead of returning a foreign mesh.
#[derive(Debug)]
struct MemoEntry {
    control_points: Vec<Point2>,
    params: GenerationParams,
    vessel: Arc<VesselMesh>,
}

impl MemoEntry {
    fn matches(&self, control_points: &[Point2], params: &GenerationParams) -> bool {
        self.control_points == control_points && self.params == *params
    }
}

/// Bounded memo of generated vessels, evicting the oldest entry first.
#[derive(Debug)]
pub struct VesselMemo {
    entries: HashMap<u64, MemoEntry>,
    order: VecDeque<u64>,
    capacity: usize,
    hits: usize,
    misses: usize,
}

impl VesselMemo {
    /// A memo holding at most `capacity` vessels (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits
    }

    #[must_use]
    pub fn misses(&self) -> usize {
        self.misses
    }

    #[must_use]
    pub fn get(&self, control_points: &[Point2], params: &GenerationParams) -> Option<Arc<VesselMesh>> {
        self.entries
            .get(&content_hash(control_points, params))
            .filter(|entry| entry.matches(control_points, params))
            .map(|entry| Arc::clone(&entry.vessel))
    }

    /// Returns the memoised vessel for these inputs or generates it with
    /// `make`. Errors are passed through and nothing is stored.
    pub fn get_or_try_insert<E>(
        &mut self,
        control_points: &[Point2],
        params: &GenerationParams,
        make: impl FnOnce() -> Result<VesselMesh, E>,
    ) -> Result<Arc<VesselMesh>, E> {
        let key = content_hash(control_points, params);
        self.get_or_try_insert_keyed(key, control_points, params, make)
    }

    fn get_or_try_insert_keyed<E>(
        &mut self,
        key: u64,
        control_points: &[Point2],
        params: &GenerationParams,
        make: impl FnOnce() -> Result<VesselMesh, E>,
    ) -> Result<Arc<VesselMesh>, E> {
        if let Some(entry) = self
            .entries
            .get(&key)
            .filter(|entry| entry.matches(control_points, params))
        {
            self.hits += 1;
            return Ok(Arc::clone(&entry.vessel));
        }

        self.misses += 1;
        let vessel = Arc::new(make()?);
        let entry = MemoEntry {
            control_points: control_points.to_vec(),
            params: *params,
            vessel: Arc::clone(&vessel),
        };

        // A colliding key keeps its queue slot and takes the new inputs.
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = entry;
            return Ok(vessel);
        }

        while self.entries.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.entries.insert(key, entry);
        self.order.push_back(key);
        Ok(vessel)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

impl Default for GeomCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for VesselMemo {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MEMO_CAPACITY)
    }
}
