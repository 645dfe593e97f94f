//! Ground grid renderer

use wgpu::util::DeviceExt;

use crate::config::GridConfig;
use crate::constants::grid as constants;
use crate::pipeline::{PrimitivePipeline, create_camera_bind_group};
use crate::vertex::PositionColorVertex;

/// Grid renderer
pub struct GridRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    bind_group: wgpu::BindGroup,
}

impl GridRenderer {
    /// Create the grid pipeline and upload lines for `config`.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        config: &GridConfig,
    ) -> Self {
        let bind_group =
            create_camera_bind_group(device, camera_bind_group_layout, camera_buffer, "Grid");

        let pipeline =
            PrimitivePipeline::Lines.create(device, format, camera_bind_group_layout);

        let (vertex_buffer, vertex_count) = upload_grid(device, config);

        Self {
            pipeline,
            vertex_buffer,
            vertex_count,
            bind_group,
        }
    }

    /// Draw the grid into the current pass.
    pub fn render(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.vertex_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}

fn upload_grid(device: &wgpu::Device, config: &GridConfig) -> (wgpu::Buffer, u32) {
    let mut vertices = generate_grid_vertices(config);
    let vertex_count = vertices.len() as u32;
    // wgpu rejects zero-sized vertex buffers
    if vertices.is_empty() {
        vertices.push(PositionColorVertex {
            position: [0.0; 3],
            color: [0.0; 3],
        });
    }

    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Grid Vertex Buffer"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    (buffer, vertex_count)
}

/// Generate grid line vertices on the XY plane.
///
/// The two lines through the origin take the axis colors.
pub fn generate_grid_vertices(config: &GridConfig) -> Vec<PositionColorVertex> {
    if config.spacing <= 0.0 || config.size <= 0.0 {
        return Vec::new();
    }

    let half_size = config.size;
    let num_lines = (config.size / config.spacing) as i32;
    let z = constants::ELEVATION;
    let mut vertices = Vec::with_capacity(((num_lines * 2 + 1) * 4) as usize);

    // Lines parallel to X axis
    for i in -num_lines..=num_lines {
        let y = i as f32 * config.spacing;
        let color = if i == 0 {
            config.x_axis_color
        } else {
            config.line_color
        };
        vertices.push(PositionColorVertex {
            position: [-half_size, y, z],
            color,
        });
        vertices.push(PositionColorVertex {
            position: [half_size, y, z],
            color,
        });
    }

    // Lines parallel to Y axis
    for i in -num_lines..=num_lines {
        let x = i as f32 * config.spacing;
        let color = if i == 0 {
            config.y_axis_color
        } else {
            config.line_color
        };
        vertices.push(PositionColorVertex {
            position: [x, -half_size, z],
            color,
        });
        vertices.push(PositionColorVertex {
            position: [x, half_size, z],
            color,
        });
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_line_count() {
        let config = GridConfig {
            size: 100.0,
            spacing: 10.0,
            ..Default::default()
        };
        let vertices = generate_grid_vertices(&config);
        // 21 lines per direction, 2 vertices each
        assert_eq!(vertices.len(), 21 * 2 * 2);
        assert!(vertices.iter().all(|v| v.position[2] < 0.0));
    }

    #[test]
    fn test_axis_lines_colored() {
        let config = GridConfig {
            size: 20.0,
            spacing: 10.0,
            ..Default::default()
        };
        let vertices = generate_grid_vertices(&config);
        let x_axis: Vec<_> = vertices
            .iter()
            .filter(|v| v.color == config.x_axis_color)
            .collect();
        assert_eq!(x_axis.len(), 2);
        assert!(x_axis.iter().all(|v| v.position[1] == 0.0));

        let y_axis = vertices
            .iter()
            .filter(|v| v.color == config.y_axis_color)
            .count();
        assert_eq!(y_axis, 2);
    }

    #[test]
    fn test_invalid_spacing_yields_nothing() {
        let config = GridConfig {
            spacing: 0.0,
            ..Default::default()
        };
        assert!(generate_grid_vertices(&config).is_empty());
    }
}
