//! Vertex formats
//!
//! Attribute offsets are computed with `std::mem::offset_of!` through the
//! [`vertex_attr!`](crate::vertex_attr) macro so they follow the struct layout.

/// Creates a vertex attribute with the offset calculated from the struct field.
#[macro_export]
macro_rules! vertex_attr {
    ($struct:ty, $field:ident, $location:expr, $format:ident) => {
        wgpu::VertexAttribute {
            offset: std::mem::offset_of!($struct, $field) as u64,
            shader_location: $location,
            format: wgpu::VertexFormat::$format,
        }
    };
}

/// Vertex format for position + color lines (grid, edges).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PositionColorVertex {
    /// Vertex position in world space.
    pub position: [f32; 3],
    /// Vertex color (RGB).
    pub color: [f32; 3],
}

impl PositionColorVertex {
    /// Vertex attribute descriptors for the shader.
    pub const ATTRIBUTES: &'static [wgpu::VertexAttribute] = &[
        vertex_attr!(PositionColorVertex, position, 0, Float32x3),
        vertex_attr!(PositionColorVertex, color, 1, Float32x3),
    ];

    /// Returns the vertex buffer layout for this vertex type.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: Self::ATTRIBUTES,
        }
    }
}

/// Vertex for shaded faces with position, normal, and color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Vertex position in world space.
    pub position: [f32; 3],
    /// Vertex normal vector.
    pub normal: [f32; 3],
    /// Vertex color (RGBA).
    pub color: [f32; 4],
}

impl MeshVertex {
    /// Vertex attribute descriptors for the shader.
    pub const ATTRIBUTES: &'static [wgpu::VertexAttribute] = &[
        vertex_attr!(MeshVertex, position, 0, Float32x3),
        vertex_attr!(MeshVertex, normal, 1, Float32x3),
        vertex_attr!(MeshVertex, color, 2, Float32x4),
    ];

    /// Returns the vertex buffer layout for this vertex type.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_offsets() {
        assert_eq!(MeshVertex::ATTRIBUTES[1].offset, 12);
        assert_eq!(MeshVertex::ATTRIBUTES[2].offset, 24);
        assert_eq!(MeshVertex::layout().array_stride, 40);
        assert_eq!(PositionColorVertex::layout().array_stride, 24);
    }
}
