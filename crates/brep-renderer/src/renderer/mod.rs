//! Main renderer combining all sub-renderers.
//!
//! The renderer is composed of several specialized components:
//! - [`CameraController`]: Camera and uniform buffer management
//! - [`ShapeManager`]: GPU buffers of displayed shapes
//! - grid, face and edge sub-renderers drawn in one MSAA pass

mod camera_controller;
mod gpu_resources;
mod render_pass;
mod shape_manager;

pub use camera_controller::CameraController;
pub use shape_manager::{ShapeEntry, ShapeManager, ShapeStyle, shape_bounds};

use uuid::Uuid;

use brep_kernel::{EdgeInfo, TessellatedMesh};

use crate::camera::Camera;
use crate::config::RendererConfig;
use crate::sub_renderers::{EdgeRenderer, GridRenderer, MeshRenderer};

/// Main renderer combining all sub-renderers.
pub struct Renderer {
    camera_controller: CameraController,
    shapes: ShapeManager,

    // Depth/MSAA resources
    #[allow(dead_code)] // Held for GPU resource lifetime
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    #[allow(dead_code)] // Held for GPU resource lifetime
    msaa_texture: Option<wgpu::Texture>,
    msaa_view: Option<wgpu::TextureView>,

    // Sub-renderers
    grid_renderer: GridRenderer,
    mesh_renderer: MeshRenderer,
    edge_renderer: EdgeRenderer,

    config: RendererConfig,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
}

impl Renderer {
    /// Creates a new renderer with the specified device and configuration.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        config: &RendererConfig,
    ) -> Self {
        let mut camera_controller = CameraController::new(device, width, height);
        camera_controller.camera_mut().apply_config(&config.camera);

        let (depth_texture, depth_view) =
            gpu_resources::create_depth_texture(device, width, height);
        let (msaa_texture, msaa_view) =
            match gpu_resources::create_msaa_texture(device, format, width, height) {
                Some((tex, view)) => (Some(tex), Some(view)),
                None => (None, None),
            };

        let layout = camera_controller.bind_group_layout();
        let buffer = camera_controller.buffer();
        let grid_renderer =
            GridRenderer::new(device, format, layout, buffer, &config.grid);
        let mesh_renderer = MeshRenderer::new(device, format, layout, buffer);
        let edge_renderer = EdgeRenderer::new(device, format, layout, buffer);

        tracing::info!("Renderer initialized ({}x{}, {:?})", width, height, format);

        Self {
            camera_controller,
            shapes: ShapeManager::new(),
            depth_texture,
            depth_view,
            msaa_texture,
            msaa_view,
            grid_renderer,
            mesh_renderer,
            edge_renderer,
            config: config.clone(),
            format,
            width,
            height,
        }
    }

    /// Resize render targets. Zero sizes are ignored.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 || (width == self.width && height == self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.camera_controller.resize(width, height);

        let (depth_texture, depth_view) =
            gpu_resources::create_depth_texture(device, width, height);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;

        let (msaa_texture, msaa_view) =
            match gpu_resources::create_msaa_texture(device, self.format, width, height) {
                Some((tex, view)) => (Some(tex), Some(view)),
                None => (None, None),
            };
        self.msaa_texture = msaa_texture;
        self.msaa_view = msaa_view;
    }

    /// Output texture format.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Get the camera.
    pub fn camera(&self) -> &Camera {
        self.camera_controller.camera()
    }

    /// Get the camera mutably.
    pub fn camera_mut(&mut self) -> &mut Camera {
        self.camera_controller.camera_mut()
    }

    /// Display a tessellated shape.
    pub fn add_shape(
        &mut self,
        device: &wgpu::Device,
        id: Uuid,
        mesh: &TessellatedMesh,
        edges: &[EdgeInfo],
        style: ShapeStyle,
    ) {
        self.shapes.add(device, id, mesh, edges, style);
    }

    /// Remove every displayed shape.
    pub fn clear_shapes(&mut self) {
        self.shapes.clear();
    }

    /// Number of displayed shapes.
    pub fn shape_count(&self) -> usize {
        self.shapes.count()
    }

    /// Displayed shape under a point of a viewport of the given size.
    pub fn pick(&self, screen_x: f32, screen_y: f32, width: f32, height: f32) -> Option<Uuid> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        let (origin, dir) = self
            .camera()
            .screen_to_ray(screen_x, screen_y, width, height);
        self.shapes.pick(origin, dir).map(|(id, _)| id)
    }

    /// Frame the camera on all displayed shapes.
    ///
    /// Returns false and leaves the camera alone when nothing is displayed.
    pub fn fit_to_shapes(&mut self) -> bool {
        let bounds = self.shapes.bounds();
        if !bounds.is_valid() {
            return false;
        }
        self.camera_controller
            .camera_mut()
            .fit_all(bounds.center(), bounds.radius());
        true
    }

    /// Whether the ground grid is drawn.
    pub fn show_grid(&self) -> bool {
        self.config.grid.enabled
    }

    /// Toggle the ground grid.
    pub fn set_show_grid(&mut self, show: bool) {
        self.config.grid.enabled = show;
    }

    /// Render all displayed shapes into `view`.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        queue: &wgpu::Queue,
    ) {
        self.camera_controller.update(queue);

        let params = render_pass::MainPassParams {
            show_grid: self.config.grid.enabled,
            shapes: &self.shapes,
            grid_renderer: &self.grid_renderer,
            mesh_renderer: &self.mesh_renderer,
            edge_renderer: &self.edge_renderer,
            depth_view: &self.depth_view,
            msaa_view: self.msaa_view.as_ref(),
            clear_color: self.config.viewport.clear_color(),
        };
        render_pass::render_main_pass(encoder, view, &params);
    }
}
