use super::super::*;
use crate::params::GenerationParams;

fn vessel() -> VesselMesh {
    let points = [
        Point2::new(0.1, 0.0),
        Point2::new(0.22, 0.2),
        Point2::new(0.3, 0.5),
        Point2::new(0.2, 0.8),
        Point2::new(0.3, 1.0),
    ];
    let params = GenerationParams {
        segments: 8,
        height_segments: 4,
        ..GenerationParams::default()
    };
    generate(&points, &params).expect("vessel")
}

#[test]
fn obj_lists_every_vertex_and_face() {
    let vessel = vessel();
    let text = obj_string(&vessel.mesh, ExportTransform::default(), "vase").expect("obj");

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("# vessel-engine"));
    assert_eq!(lines.next(), Some("o vase"));

    let vertices = text.lines().filter(|l| l.starts_with("v ")).count();
    let faces: Vec<&str> = text.lines().filter(|l| l.starts_with("f ")).collect();
    assert_eq!(vertices, vessel.mesh.vertex_count());
    assert_eq!(faces.len(), vessel.mesh.triangle_count());

    // 1-based, same order as the index buffer.
    let tri = &vessel.mesh.indices[0..3];
    assert_eq!(faces[0], format!("f {} {} {}", tri[0] + 1, tri[1] + 1, tri[2] + 1));
}

#[test]
fn obj_vertices_are_z_up_millimetres() {
    let vessel = vessel();
    let text = obj_string(&vessel.mesh, ExportTransform::default(), "vase").expect("obj");

    let mut max_z = f64::NEG_INFINITY;
    let mut min_z = f64::INFINITY;
    for line in text.lines().filter(|l| l.starts_with("v ")) {
        let z: f64 = line
            .split_whitespace()
            .nth(3)
            .and_then(|v| v.parse().ok())
            .expect("z coordinate");
        max_z = max_z.max(z);
        min_z = min_z.min(z);
    }
    assert!(min_z.abs() < 1e-6);
    assert!((max_z - vessel.dimensions_mm()[1]).abs() < 1e-6);
}

#[test]
fn export_rejects_broken_meshes() {
    let mesh = GeomMesh::new(vec![[0.0, 0.0, 0.0]], vec![0, 1, 2]);
    let err = obj_string(&mesh, ExportTransform::identity(), "broken").expect_err("invalid");
    assert!(matches!(err, ExportError::InvalidMesh(_)));
}

#[test]
fn write_obj_reports_io_errors() {
    struct Failing;
    impl std::io::Write for Failing {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let vessel = vessel();
    let err = write_obj(&vessel.mesh, ExportTransform::default(), "vase", Failing).expect_err("io");
    assert!(matches!(err, ExportError::Io(_)));
}
