//! Viewport rendering state

use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use brep_kernel::{EdgeInfo, TessellatedMesh};
use brep_renderer::{Renderer, RendererConfig, ShapeStyle};

use super::ViewPreset;

/// Render texture for viewport
struct RenderTexture {
    #[allow(dead_code)]
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    egui_texture_id: egui::TextureId,
    width: u32,
    height: u32,
}

/// Viewport rendering state
pub struct ViewportState {
    pub renderer: Renderer,
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
    render_texture: Option<RenderTexture>,
}

/// Shared viewport state
pub type SharedViewportState = Arc<Mutex<ViewportState>>;

impl ViewportState {
    /// Create a new viewport state
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        format: wgpu::TextureFormat,
    ) -> Self {
        let renderer = Renderer::new(&device, format, 800, 600, &RendererConfig::default());
        Self {
            renderer,
            device,
            queue,
            render_texture: None,
        }
    }

    /// Ensure the render texture matches the requested size
    pub fn ensure_texture(
        &mut self,
        width: u32,
        height: u32,
        egui_renderer: &mut egui_wgpu::Renderer,
    ) -> egui::TextureId {
        let width = width.max(1);
        let height = height.max(1);

        if let Some(rt) = &self.render_texture
            && rt.width == width
            && rt.height == height
        {
            return rt.egui_texture_id;
        }

        // Free old texture if exists
        if let Some(old) = self.render_texture.take() {
            egui_renderer.free_texture(&old.egui_texture_id);
        }

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Viewport Render Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.renderer.format(),
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Register with egui
        let egui_texture_id =
            egui_renderer.register_native_texture(&self.device, &view, wgpu::FilterMode::Linear);

        self.renderer.resize(&self.device, width, height);

        self.render_texture = Some(RenderTexture {
            texture,
            view,
            egui_texture_id,
            width,
            height,
        });
        egui_texture_id
    }

    /// Render the 3D scene to the texture
    pub fn render(&mut self) {
        let Some(ref rt) = self.render_texture else {
            return;
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Viewport Render Encoder"),
            });

        self.renderer.render(&mut encoder, &rt.view, &self.queue);

        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Upload a tessellated shape
    pub fn add_shape(
        &mut self,
        id: Uuid,
        mesh: &TessellatedMesh,
        edges: &[EdgeInfo],
        style: ShapeStyle,
    ) {
        self.renderer.add_shape(&self.device, id, mesh, edges, style);
    }

    /// Remove every displayed shape
    pub fn clear_shapes(&mut self) {
        self.renderer.clear_shapes();
    }

    /// Frame all displayed shapes, keeping the camera when nothing is shown
    pub fn fit_all(&mut self) {
        if !self.renderer.fit_to_shapes() {
            tracing::debug!("Fit all skipped: viewport is empty");
        }
    }

    /// Switch to a standard view and frame the shapes
    pub fn set_view(&mut self, preset: ViewPreset) {
        let camera = self.renderer.camera_mut();
        match preset {
            ViewPreset::Top => camera.set_top_view(),
            ViewPreset::Front => camera.set_front_view(),
            ViewPreset::Side => camera.set_side_view(),
        }
        self.renderer.fit_to_shapes();
    }
}
