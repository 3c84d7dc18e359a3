use super::cache::GeomCache;
use super::core::{Point3, Tolerance};
use super::metrics::GeomMetrics;

/// Indexed triangle mesh: `positions` are vertices, `indices` are a flat
/// triangle list (stride 3) referring into `positions`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeomMesh {
    pub positions: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
}

impl GeomMesh {
    #[must_use]
    pub fn new(positions: Vec<[f64; 3]>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if any vertex position contains NaN or Inf values.
    #[must_use]
    pub fn has_invalid_vertices(&self) -> bool {
        self.positions
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite() || !p[2].is_finite())
    }

    /// Returns true if all vertex indices are within bounds.
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.positions.len();
        self.indices.iter().all(|&i| (i as usize) < n)
    }

    #[must_use]
    pub fn has_triangle_indices(&self) -> bool {
        self.indices.len() % 3 == 0
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.has_triangle_indices() {
            return Err("mesh indices are not a triangle list (len % 3 != 0)".to_string());
        }
        if self.has_invalid_vertices() {
            return Err("mesh has invalid vertex coordinates (NaN/Inf)".to_string());
        }
        if !self.has_valid_indices() {
            return Err("mesh has out-of-bounds vertex indices".to_string());
        }
        Ok(())
    }

    /// Corner positions of triangle `t`, or `None` if it references a
    /// missing vertex.
    #[must_use]
    pub fn triangle(&self, t: usize) -> Option<[Point3; 3]> {
        let tri = self.indices.get(t * 3..t * 3 + 3)?;
        let corner = |i: u32| self.positions.get(i as usize).copied().map(Point3::from_array);
        Some([corner(tri[0])?, corner(tri[1])?, corner(tri[2])?])
    }

    /// Twice the area of triangle `t`.
    #[must_use]
    pub fn triangle_double_area(&self, t: usize) -> Option<f64> {
        let [a, b, c] = self.triangle(t)?;
        Some(b.sub_point(a).cross(c.sub_point(a)).length())
    }

    /// Enclosed volume via the divergence theorem. Positive when the
    /// triangles of a closed mesh face outward.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        (0..self.triangle_count())
            .filter_map(|t| self.triangle(t))
            .map(|[a, b, c]| {
                let (a, b, c) = (
                    a.sub_point(Point3::default()),
                    b.sub_point(Point3::default()),
                    c.sub_point(Point3::default()),
                );
                a.dot(b.cross(c))
            })
            .sum::<f64>()
            / 6.0
    }

    /// Position buffer as `[x0, y0, z0, x1, y1, z1, ...]` without copying.
    #[must_use]
    pub fn positions_flat(&self) -> &[f64] {
        self.positions.as_flattened()
    }
}

/// Per-caller state threaded through generation: tolerance, reusable
/// intermediate results, timing, and the last good vertical offset.
#[derive(Debug)]
pub struct GeomContext {
    pub tolerance: Tolerance,
    pub cache: GeomCache,
    pub metrics: GeomMetrics,
    /// Offset applied by the most recent successful placement; used when a
    /// mesh has no computable bounding box.
    pub last_vertical_offset: f64,
}

impl GeomContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tolerance: Tolerance::default_geom(),
            cache: GeomCache::default(),
            metrics: GeomMetrics::default(),
            last_vertical_offset: 0.0,
        }
    }
}

impl Default for GeomContext {
    fn default() -> Self {
        Self::new()
    }
}
