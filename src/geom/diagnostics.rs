//! Mesh diagnostics for generated vessels.
//!
//! Diagnostics are computed once per generated mesh and answer the questions
//! a 3D-printing front-end cares about: is the shell closed, is every edge
//! shared by exactly two triangles, are there slivers, and does the winding
//! face outward.
//!
//! # Example
//!
//! ```ignore
//! use vessel_engine::geom::generate;
//!
//! let vessel = generate(&points, &params)?;
//! if !vessel.diagnostics.is_valid_solid() {
//!     for warning in &vessel.diagnostics.warnings {
//!         eprintln!("Warning: {warning}");
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

use super::core::Tolerance;
use super::mesh::GeomMesh;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct GeomMeshDiagnostics {
    /// Total number of vertices in the final mesh.
    pub vertex_count: usize,

    /// Total number of triangles in the final mesh.
    pub triangle_count: usize,

    /// Triangles whose area is zero within tolerance.
    pub degenerate_triangle_count: usize,

    /// Edges with only one adjacent triangle (holes in the shell).
    pub open_edge_count: usize,

    /// Edges with more than two adjacent triangles.
    pub non_manifold_edge_count: usize,

    /// Enclosed volume in model units; negative means inward-facing winding.
    pub signed_volume: f64,

    /// Optional timing breakdown by generation stage.
    ///
    /// Only populated when the `mesh_metrics` feature is enabled
    /// and the target is not WASM.
    pub timing: Option<super::metrics::GeomTimingReport>,

    /// Human-readable notes about mesh issues.
    pub warnings: Vec<String>,
}

impl GeomMeshDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspects `mesh` for degenerate triangles, edge topology and orientation.
    #[must_use]
    pub fn analyze(mesh: &GeomMesh, tol: Tolerance) -> Self {
        let degenerate_triangle_count = (0..mesh.triangle_count())
            .filter(|&t| {
                mesh.triangle_double_area(t)
                    .is_none_or(|area| !area.is_finite() || area <= tol.eps * tol.eps)
            })
            .count();
        let (open_edge_count, non_manifold_edge_count) = count_edge_topology(&mesh.indices);
        let signed_volume = mesh.signed_volume();

        let mut diagnostics = Self {
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            degenerate_triangle_count,
            open_edge_count,
            non_manifold_edge_count,
            signed_volume,
            timing: None,
            warnings: Vec::new(),
        };

        if degenerate_triangle_count > 0 {
            diagnostics.add_warning("mesh has zero-area triangles");
        }
        if open_edge_count > 0 {
            diagnostics.add_warning("mesh has open edges");
        }
        if non_manifold_edge_count > 0 {
            diagnostics.add_warning("mesh has non-manifold edges");
        }
        if diagnostics.is_valid_solid() && signed_volume < 0.0 {
            diagnostics.add_warning("mesh winding faces inward");
        }
        diagnostics
    }

    /// Returns `true` if the mesh has no open edges.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.open_edge_count == 0
    }

    /// Returns `true` if no edge is shared by more than two triangles.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.non_manifold_edge_count == 0
    }

    #[must_use]
    pub fn is_valid_solid(&self) -> bool {
        self.is_watertight() && self.is_manifold()
    }

    /// Valid solid with no slivers and no warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.is_valid_solid() && self.degenerate_triangle_count == 0 && self.warnings.is_empty()
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Returns a short summary string suitable for logging.
    ///
    /// Format: `"V:{vertices} T:{triangles} [issues...]"`
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("V:{} T:{}", self.vertex_count, self.triangle_count)];

        if self.degenerate_triangle_count > 0 {
            parts.push(format!("degenerate:{}", self.degenerate_triangle_count));
        }
        if self.open_edge_count > 0 {
            parts.push(format!("open:{}", self.open_edge_count));
        }
        if self.non_manifold_edge_count > 0 {
            parts.push(format!("non-manifold:{}", self.non_manifold_edge_count));
        }
        if let Some(timing) = &self.timing {
            parts.push(format!("{:.3}ms", timing.total_ms()));
        }

        parts.join(" ")
    }
}

impl fmt::Display for GeomMeshDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mesh Diagnostics:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Triangles: {}", self.triangle_count)?;
        writeln!(f, "  Volume: {:.6}", self.signed_volume)?;

        if self.degenerate_triangle_count > 0
            || self.open_edge_count > 0
            || self.non_manifold_edge_count > 0
        {
            writeln!(f, "  Issues:")?;
            if self.degenerate_triangle_count > 0 {
                writeln!(f, "    - Degenerate triangles: {}", self.degenerate_triangle_count)?;
            }
            if self.open_edge_count > 0 {
                writeln!(f, "    - Open edges: {}", self.open_edge_count)?;
            }
            if self.non_manifold_edge_count > 0 {
                writeln!(f, "    - Non-manifold edges: {}", self.non_manifold_edge_count)?;
            }
        }

        if !self.warnings.is_empty() {
            writeln!(f, "  Warnings:")?;
            for warning in &self.warnings {
                writeln!(f, "    - {warning}")?;
            }
        }

        if let Some(timing) = &self.timing {
            writeln!(f, "  Timing: {} ms total", timing.total_ms())?;
        }

        let status = if self.is_clean() {
            "CLEAN"
        } else if self.is_valid_solid() {
            "VALID (with warnings)"
        } else {
            "ISSUES DETECTED"
        };
        writeln!(f, "  Status: {status}")
    }
}

/// Counts open (one triangle) and non-manifold (three or more) edges.
/// Triangles that repeat a vertex index are ignored.
fn count_edge_topology(indices: &[u32]) -> (usize, usize) {
    let mut edge_counts: HashMap<(u32, u32), u32> = HashMap::new();

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0], tri[1], tri[2]);
        if i0 == i1 || i1 == i2 || i0 == i2 {
            continue;
        }
        for (a, b) in [(i0, i1), (i1, i2), (i2, i0)] {
            *edge_counts.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        }
    }

    edge_counts
        .values()
        .fold((0, 0), |(open, non_manifold), &count| match count {
            1 => (open + 1, non_manifold),
            2 => (open, non_manifold),
            _ => (open, non_manifold + 1),
        })
}
