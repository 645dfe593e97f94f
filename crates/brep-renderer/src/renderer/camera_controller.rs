//! Camera and uniform buffer management.

use wgpu::util::DeviceExt;

use crate::camera::Camera;
use crate::pipeline::create_camera_bind_group_layout;

/// Owns the camera together with its GPU uniform buffer.
pub struct CameraController {
    camera: Camera,
    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraController {
    /// Create a camera sized to the viewport.
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let camera = Camera::new(aspect_ratio(width, height));

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera.uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = create_camera_bind_group_layout(device);

        Self {
            camera,
            buffer,
            bind_group_layout,
        }
    }

    /// Get the camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Get the camera mutably.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Camera uniform buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Bind group layout for the camera uniform.
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Update the aspect ratio after a resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.update_aspect(aspect_ratio(width, height));
    }

    /// Upload the current camera matrices.
    pub fn update(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.camera.uniform()]));
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_guards_zero() {
        assert_eq!(aspect_ratio(800, 400), 2.0);
        assert_eq!(aspect_ratio(0, 0), 1.0);
    }
}
