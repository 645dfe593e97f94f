//! Render pass execution.

use crate::sub_renderers::{EdgeRenderer, GridRenderer, MeshRenderer};

use super::ShapeManager;

/// Main pass parameters.
pub struct MainPassParams<'a> {
    /// Whether the ground grid is drawn.
    pub show_grid: bool,
    /// Displayed shapes.
    pub shapes: &'a ShapeManager,
    /// Grid renderer.
    pub grid_renderer: &'a GridRenderer,
    /// Face renderer.
    pub mesh_renderer: &'a MeshRenderer,
    /// Edge renderer.
    pub edge_renderer: &'a EdgeRenderer,
    /// Depth view.
    pub depth_view: &'a wgpu::TextureView,
    /// MSAA view (if MSAA is enabled).
    pub msaa_view: Option<&'a wgpu::TextureView>,
    /// Clear color.
    pub clear_color: wgpu::Color,
}

/// Execute the main render pass.
pub fn render_main_pass(
    encoder: &mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    params: &MainPassParams<'_>,
) {
    let ops = wgpu::Operations {
        load: wgpu::LoadOp::Clear(params.clear_color),
        store: wgpu::StoreOp::Store,
    };
    let color_attachment = match params.msaa_view {
        // Render to the multisample texture and resolve into the output
        Some(msaa_view) => wgpu::RenderPassColorAttachment {
            view: msaa_view,
            resolve_target: Some(view),
            ops,
        },
        None => wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops,
        },
    };

    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Main Render Pass"),
        color_attachments: &[Some(color_attachment)],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: params.depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    });

    if params.show_grid {
        params.grid_renderer.render(&mut render_pass);
    }

    for entry in params.shapes.iter() {
        if let Some(mesh) = &entry.mesh {
            params.mesh_renderer.render(&mut render_pass, mesh);
        }
    }

    // Edges after all faces so the biased faces never cover them
    for entry in params.shapes.iter() {
        if let Some(edges) = &entry.edges {
            params.edge_renderer.render(&mut render_pass, edges);
        }
    }
}
