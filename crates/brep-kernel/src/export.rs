//! STL export of tessellated shapes

use std::path::Path;

use glam::Vec3;

use crate::kernel::{KernelError, KernelResult, TessellatedMesh};

/// Write a tessellated mesh as binary STL
///
/// Facet normals are recomputed from the triangle winding.
pub fn export_stl(mesh: &TessellatedMesh, path: impl AsRef<Path>) -> KernelResult<()> {
    let path = path.as_ref();

    if mesh.triangle_count() == 0 {
        return Err(KernelError::StlExport("mesh has no triangles".into()));
    }

    let triangles: Vec<stl_io::Triangle> = mesh
        .triangles()
        .map(|[v0, v1, v2]| {
            let normal = (v1 - v0).cross(v2 - v0).try_normalize().unwrap_or(Vec3::Z);
            stl_io::Triangle {
                normal: stl_io::Normal::new(normal.to_array()),
                vertices: [
                    stl_io::Vertex::new(v0.to_array()),
                    stl_io::Vertex::new(v1.to_array()),
                    stl_io::Vertex::new(v2.to_array()),
                ],
            }
        })
        .collect();

    let mut file = std::fs::File::create(path).map_err(|e| KernelError::FileIo(e.to_string()))?;
    stl_io::write_stl(&mut file, triangles.iter())
        .map_err(|e| KernelError::StlExport(e.to_string()))?;

    tracing::info!(
        "Exported {} triangles to {}",
        triangles.len(),
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_writes_binary_stl() {
        let mesh = TessellatedMesh {
            vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            indices: vec![0, 1, 2],
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triangle.stl");

        export_stl(&mesh, &path).unwrap();

        let mut file = std::fs::File::open(&path).unwrap();
        let indexed = stl_io::read_stl(&mut file).unwrap();
        assert_eq!(indexed.faces.len(), 1);
        assert_eq!(indexed.vertices.len(), 3);
        // 80-byte header, count, one 50-byte facet
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 134);
    }

    #[test]
    fn test_export_rejects_empty_mesh() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_stl(&TessellatedMesh::new(), dir.path().join("empty.stl")).unwrap_err();
        assert!(matches!(err, KernelError::StlExport(_)));
    }
}
