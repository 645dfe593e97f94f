//! Render pipelines for shaded faces and line geometry
//!
//! The viewport draws exactly two kinds of primitives. Faces are two-sided
//! lit triangles pushed back with a depth bias; lines (shape edges and the
//! ground grid) pass the depth test on ties so they stay on top of the faces
//! they bound. Both render into the MSAA target with the shared depth format.

use crate::constants::shading::{FACE_DEPTH_BIAS, FACE_DEPTH_BIAS_SLOPE};
use crate::constants::viewport::{DEPTH_FORMAT, SAMPLE_COUNT};
use crate::vertex::{MeshVertex, PositionColorVertex};

/// Primitive kind drawn by the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitivePipeline {
    /// Lit triangles from [`MeshVertex`] buffers
    Faces,
    /// Colored segments from [`PositionColorVertex`] buffers
    Lines,
}

impl PrimitivePipeline {
    fn label(self) -> &'static str {
        match self {
            Self::Faces => "Faces",
            Self::Lines => "Lines",
        }
    }

    fn shader_source(self) -> &'static str {
        match self {
            Self::Faces => include_str!("shaders/mesh.wgsl"),
            Self::Lines => include_str!("shaders/line.wgsl"),
        }
    }

    fn vertex_layout(self) -> wgpu::VertexBufferLayout<'static> {
        match self {
            Self::Faces => MeshVertex::layout(),
            Self::Lines => PositionColorVertex::layout(),
        }
    }

    /// Topology and culling; faces are never culled since open shells show
    /// their inside.
    pub fn primitive_state(self) -> wgpu::PrimitiveState {
        let topology = match self {
            Self::Faces => wgpu::PrimitiveTopology::TriangleList,
            Self::Lines => wgpu::PrimitiveTopology::LineList,
        };
        wgpu::PrimitiveState {
            topology,
            cull_mode: None,
            ..Default::default()
        }
    }

    /// Depth test, with the face bias that keeps coplanar edges visible
    pub fn depth_stencil_state(self) -> wgpu::DepthStencilState {
        let (depth_compare, bias) = match self {
            Self::Faces => (
                wgpu::CompareFunction::Less,
                wgpu::DepthBiasState {
                    constant: FACE_DEPTH_BIAS,
                    slope_scale: FACE_DEPTH_BIAS_SLOPE,
                    clamp: 0.0,
                },
            ),
            Self::Lines => (
                wgpu::CompareFunction::LessEqual,
                wgpu::DepthBiasState::default(),
            ),
        };
        wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare,
            stencil: wgpu::StencilState::default(),
            bias,
        }
    }

    /// Compile the shader and create the pipeline for `format` targets.
    pub fn create(
        self,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let label = self.label();
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{label} Shader")),
            source: wgpu::ShaderSource::Wgsl(self.shader_source().into()),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{label} Pipeline Layout")),
            bind_group_layouts: &[camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{label} Pipeline")),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[self.vertex_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: self.primitive_state(),
            depth_stencil: Some(self.depth_stencil_state()),
            multisample: wgpu::MultisampleState {
                count: SAMPLE_COUNT,
                ..Default::default()
            },
            multiview: None,
            cache: None,
        })
    }
}

/// Layout of the camera uniform at group 0, binding 0.
pub fn create_camera_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Camera Bind Group Layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

/// Bind the camera uniform buffer for one sub-renderer.
pub fn create_camera_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{label} Camera Bind Group")),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    })
}
