//! Shaded face renderer for tessellated B-rep shapes

use glam::Vec3;
use wgpu::util::DeviceExt;

use brep_kernel::TessellatedMesh;

use crate::pipeline::{PrimitivePipeline, create_camera_bind_group};
use crate::vertex::MeshVertex;

/// GPU mesh data
pub struct MeshData {
    /// Vertex buffer containing mesh geometry.
    pub vertex_buffer: wgpu::Buffer,
    /// Index buffer for indexed drawing.
    pub index_buffer: wgpu::Buffer,
    /// Number of indices.
    pub index_count: u32,
}

impl MeshData {
    /// Upload a tessellated shape with a uniform face color.
    ///
    /// Returns `None` when the mesh has no drawable triangles.
    pub fn from_tessellated(
        device: &wgpu::Device,
        mesh: &TessellatedMesh,
        color: [f32; 4],
    ) -> Option<Self> {
        let (vertices, indices) = build_mesh_vertices(mesh, color);
        if indices.is_empty() {
            tracing::debug!("Skipping mesh upload: no triangles");
            return None;
        }

        tracing::debug!(
            "MeshData created: {} GPU vertices, {} indices",
            vertices.len(),
            indices.len()
        );

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Some(Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        })
    }
}

/// Expand a tessellated mesh into GPU vertices.
///
/// Triangles referencing missing vertices are dropped. Missing normals fall
/// back to the triangle's geometric normal.
pub fn build_mesh_vertices(mesh: &TessellatedMesh, color: [f32; 4]) -> (Vec<MeshVertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(mesh.indices.len());

    for tri in mesh.indices.chunks_exact(3) {
        let Some(positions) = tri
            .iter()
            .map(|&i| mesh.vertices.get(i as usize).copied())
            .collect::<Option<Vec<[f32; 3]>>>()
        else {
            continue;
        };

        let face_normal = {
            let [a, b, c] = [
                Vec3::from(positions[0]),
                Vec3::from(positions[1]),
                Vec3::from(positions[2]),
            ];
            (b - a).cross(c - a).normalize_or_zero()
        };

        for (&index, position) in tri.iter().zip(positions) {
            let normal = mesh
                .normals
                .get(index as usize)
                .copied()
                .unwrap_or(face_normal.to_array());
            vertices.push(MeshVertex {
                position,
                normal,
                color,
            });
        }
    }

    let indices = (0..vertices.len() as u32).collect();
    (vertices, indices)
}

/// Face renderer
pub struct MeshRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
}

impl MeshRenderer {
    /// Create the face pipeline.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let bind_group =
            create_camera_bind_group(device, camera_bind_group_layout, camera_buffer, "Mesh");

        let pipeline =
            PrimitivePipeline::Faces.create(device, format, camera_bind_group_layout);

        Self {
            pipeline,
            bind_group,
        }
    }

    /// Draw one shape's faces.
    pub fn render(&self, render_pass: &mut wgpu::RenderPass<'_>, mesh: &MeshData) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> TessellatedMesh {
        TessellatedMesh {
            vertices: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            normals: vec![[0.0, 0.0, 1.0]; 4],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    #[test]
    fn test_build_mesh_vertices() {
        let color = [0.2, 0.4, 0.6, 1.0];
        let (vertices, indices) = build_mesh_vertices(&square(), color);
        assert_eq!(vertices.len(), 6);
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
        assert!(vertices.iter().all(|v| v.color == color));
        assert_eq!(vertices[4].position, [1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_missing_normals_use_face_normal() {
        let mut mesh = square();
        mesh.normals.clear();
        let (vertices, _) = build_mesh_vertices(&mesh, [1.0; 4]);
        assert!(vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_out_of_range_triangle_dropped() {
        let mut mesh = square();
        mesh.indices.extend([0, 2, 9]);
        let (vertices, indices) = build_mesh_vertices(&mesh, [1.0; 4]);
        assert_eq!(vertices.len(), 6);
        assert_eq!(indices.len(), 6);
    }
}
