//! Wavefront OBJ export for slicers.
//!
//! The engine is Y-up in model units; printers expect Z-up millimetres, so the
//! default export transform scales by [`UNIT_TO_MM`] and turns +Y into +Z.

use std::f64::consts::FRAC_PI_2;
use std::io::{self, BufWriter, Write};

use super::core::{Point3, Transform};
use super::mesh::GeomMesh;
use super::vessel::UNIT_TO_MM;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("mesh validation failed: {0}")]
    InvalidMesh(String),
    #[error("write obj: {0}")]
    Io(#[from] io::Error),
}

/// Transform applied to every vertex on export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportTransform {
    pub transform: Transform,
}

impl ExportTransform {
    #[must_use]
    pub const fn new(transform: Transform) -> Self {
        Self { transform }
    }

    #[must_use]
    pub const fn identity() -> Self {
        Self::new(Transform::identity())
    }

    /// Uniform scale followed by a rotation of +90 degrees about X.
    #[must_use]
    pub fn z_up(scale: f64) -> Self {
        Self::new(Transform::rotate_x(FRAC_PI_2).compose(Transform::uniform_scale(scale)))
    }

    /// A mirroring transform reverses every triangle.
    #[must_use]
    pub fn flips_winding(self) -> bool {
        self.transform.linear_determinant() < 0.0
    }
}

impl Default for ExportTransform {
    fn default() -> Self {
        Self::z_up(UNIT_TO_MM)
    }
}

/// Writes `mesh` as a single OBJ object named `name`.
///
/// Faces are 1-based and keep the mesh's outward winding, also under
/// mirroring transforms.
///
/// # Errors
///
/// Fails if the mesh has out-of-range indices or non-finite positions, or if
/// the writer fails.
pub fn write_obj<W: Write>(
    mesh: &GeomMesh,
    transform: ExportTransform,
    name: &str,
    writer: W,
) -> Result<(), ExportError> {
    mesh.validate().map_err(ExportError::InvalidMesh)?;

    let mut w = BufWriter::new(writer);
    writeln!(w, "# vessel-engine")?;
    writeln!(w, "o {name}")?;

    for p in &mesh.positions {
        let v = transform.transform.apply_point(Point3::from_array(*p));
        writeln!(w, "v {} {} {}", v.x, v.y, v.z)?;
    }

    let flip = transform.flips_winding();
    for tri in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        if flip {
            writeln!(w, "f {a} {c} {b}")?;
        } else {
            writeln!(w, "f {a} {b} {c}")?;
        }
    }

    w.flush()?;
    Ok(())
}

/// [`write_obj`] into a `String`.
///
/// # Errors
///
/// Fails for the same mesh problems as [`write_obj`].
pub fn obj_string(mesh: &GeomMesh, transform: ExportTransform, name: &str) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_obj(mesh, transform, name, &mut buffer)?;
    // Every byte written above comes from `format!` of str and numbers.
    String::from_utf8(buffer).map_err(|e| ExportError::InvalidMesh(e.to_string()))
}
