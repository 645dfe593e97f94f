//! Viewer implementation backed by the kernel and the viewport renderer

use brep_core::{DemoConfig, Viewer};
use brep_kernel::{BrepKernel, KernelResult, ShapeHandle, ShapeKind};
use brep_renderer::ShapeStyle;

use crate::state::ViewportState;

/// Tessellates shapes through the kernel and uploads them to the viewport.
///
/// Without a viewport (no wgpu context) shapes are still tessellated and
/// tracked so the display list stays consistent.
pub struct KernelViewer<'a> {
    kernel: &'a dyn BrepKernel,
    viewport: Option<&'a mut ViewportState>,
    config: &'a DemoConfig,
    displayed: &'a mut Vec<ShapeHandle>,
    errors: Vec<String>,
}

impl<'a> KernelViewer<'a> {
    pub fn new(
        kernel: &'a dyn BrepKernel,
        viewport: Option<&'a mut ViewportState>,
        config: &'a DemoConfig,
        displayed: &'a mut Vec<ShapeHandle>,
    ) -> Self {
        Self {
            kernel,
            viewport,
            config,
            displayed,
            errors: Vec::new(),
        }
    }

    /// Display failures collected since creation
    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    fn upload(&mut self, shape: ShapeHandle) -> KernelResult<()> {
        let mesh = self.kernel.tessellate(&shape)?;
        let edges = self.kernel.edges(&shape)?;
        tracing::debug!(
            "Displaying {} {}: {} triangles, {} edges",
            shape.kind(),
            shape.id(),
            mesh.triangle_count(),
            edges.len()
        );

        let style = style_for(self.config, shape.kind());
        if let Some(viewport) = self.viewport.as_deref_mut() {
            viewport.add_shape(shape.id(), &mesh, &edges, style);
        }
        Ok(())
    }
}

impl Viewer for KernelViewer<'_> {
    fn erase_all(&mut self) {
        self.displayed.clear();
        if let Some(viewport) = self.viewport.as_deref_mut() {
            viewport.clear_shapes();
        }
    }

    fn display(&mut self, shape: ShapeHandle, update: bool) {
        match self.upload(shape) {
            Ok(()) => self.displayed.push(shape),
            Err(e) => {
                let message = format!("Cannot display {} {}: {}", shape.kind(), shape.id(), e);
                tracing::error!("{}", message);
                self.errors.push(message);
            }
        }

        if update && let Some(viewport) = self.viewport.as_deref_mut() {
            viewport.fit_all();
        }
    }
}

/// Face and edge colors for a shape kind
pub fn style_for(config: &DemoConfig, kind: ShapeKind) -> ShapeStyle {
    let face_color = match kind {
        ShapeKind::Face => config.face_color,
        ShapeKind::Shell => config.shell_color,
        ShapeKind::Solid => config.solid_color,
    };
    let [r, g, b, _] = config.edge_color;
    ShapeStyle {
        face_color,
        edge_color: [r, g, b],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brep_kernel::{FaceHandle, NullKernel};

    #[test]
    fn test_style_by_kind() {
        let config = DemoConfig::default();
        assert_eq!(style_for(&config, ShapeKind::Face).face_color, config.face_color);
        assert_eq!(style_for(&config, ShapeKind::Shell).face_color, config.shell_color);
        assert_eq!(style_for(&config, ShapeKind::Solid).face_color, config.solid_color);
        assert_eq!(style_for(&config, ShapeKind::Solid).edge_color, [0.05, 0.05, 0.05]);
    }

    #[test]
    fn test_failed_display_is_reported() {
        let config = DemoConfig::default();
        let kernel = NullKernel;
        let mut displayed = Vec::new();
        let mut viewer = KernelViewer::new(&kernel, None, &config, &mut displayed);

        let face = ShapeHandle::Face(FaceHandle::new(uuid::Uuid::from_u128(1)));
        viewer.display(face, true);
        let errors = viewer.into_errors();
        assert_eq!(errors.len(), 1);
        assert!(displayed.is_empty());
    }
}
