//! Boundary edge renderer

use wgpu::util::DeviceExt;

use brep_kernel::EdgeInfo;

use crate::pipeline::{PrimitivePipeline, create_camera_bind_group};
use crate::vertex::PositionColorVertex;

/// GPU line data for one shape's edges
pub struct EdgeData {
    /// Line list vertex buffer.
    pub vertex_buffer: wgpu::Buffer,
    /// Number of vertices (two per edge).
    pub vertex_count: u32,
}

impl EdgeData {
    /// Upload edges as a line list, `None` when there are no edges.
    pub fn from_edges(device: &wgpu::Device, edges: &[EdgeInfo], color: [f32; 3]) -> Option<Self> {
        let vertices = build_edge_vertices(edges, color);
        if vertices.is_empty() {
            return None;
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Edge Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Some(Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        })
    }
}

/// Line list vertices for a set of edges.
pub fn build_edge_vertices(edges: &[EdgeInfo], color: [f32; 3]) -> Vec<PositionColorVertex> {
    edges
        .iter()
        .flat_map(|edge| {
            [
                PositionColorVertex {
                    position: edge.start.to_array(),
                    color,
                },
                PositionColorVertex {
                    position: edge.end.to_array(),
                    color,
                },
            ]
        })
        .collect()
}

/// Edge renderer
pub struct EdgeRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
}

impl EdgeRenderer {
    /// Create the edge line pipeline.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let bind_group =
            create_camera_bind_group(device, camera_bind_group_layout, camera_buffer, "Edge");

        let pipeline =
            PrimitivePipeline::Lines.create(device, format, camera_bind_group_layout);

        Self {
            pipeline,
            bind_group,
        }
    }

    /// Draw one shape's edges.
    pub fn render(&self, render_pass: &mut wgpu::RenderPass<'_>, edges: &EdgeData) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, edges.vertex_buffer.slice(..));
        render_pass.draw(0..edges.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_two_vertices_per_edge() {
        let edges = vec![
            EdgeInfo::new(Vec3::ZERO, Vec3::X),
            EdgeInfo::new(Vec3::X, Vec3::new(1.0, 1.0, 0.0)),
        ];
        let vertices = build_edge_vertices(&edges, [1.0, 0.0, 0.0]);
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(vertices[3].position, [1.0, 1.0, 0.0]);
        assert!(vertices.iter().all(|v| v.color == [1.0, 0.0, 0.0]));
    }

    #[test]
    fn test_no_edges() {
        assert!(build_edge_vertices(&[], [0.0; 3]).is_empty());
    }
}
