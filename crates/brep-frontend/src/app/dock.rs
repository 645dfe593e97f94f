//! Dock layout and tab viewer

use egui_dock::{DockState, NodeIndex, TabViewer};

use crate::panels::{ArtifactsPanel, BuildLogPanel, Panel, ViewportPanel};
use crate::state::{SharedAppState, SharedViewportState};

/// Panel types for the dock system
pub enum PanelType {
    Viewport(ViewportPanel),
    BuildLog(BuildLogPanel),
    Artifacts(ArtifactsPanel),
}

impl PanelType {
    pub fn name(&self) -> &str {
        match self {
            PanelType::Viewport(p) => p.name(),
            PanelType::BuildLog(p) => p.name(),
            PanelType::Artifacts(p) => p.name(),
        }
    }
}

/// Tab viewer for dock area
pub struct DemoTabViewer<'a> {
    pub app_state: &'a SharedAppState,
    pub render_state: Option<&'a egui_wgpu::RenderState>,
    pub viewport_state: &'a Option<SharedViewportState>,
}

impl TabViewer for DemoTabViewer<'_> {
    type Tab = PanelType;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        tab.name().into()
    }

    fn ui(&mut self, ui: &mut egui::Ui, tab: &mut Self::Tab) {
        match tab {
            PanelType::Viewport(panel) => {
                if let (Some(render_state), Some(viewport_state)) =
                    (self.render_state, self.viewport_state)
                {
                    panel.ui_with_render_context(ui, self.app_state, render_state, viewport_state);
                } else {
                    panel.ui(ui, self.app_state);
                }
            }
            PanelType::BuildLog(panel) => panel.ui(ui, self.app_state),
            PanelType::Artifacts(panel) => panel.ui(ui, self.app_state),
        }
    }

    fn closeable(&mut self, _tab: &mut Self::Tab) -> bool {
        false
    }
}

/// Create the default dock layout
pub fn create_dock_layout() -> DockState<PanelType> {
    let mut dock_state = DockState::new(vec![PanelType::Viewport(ViewportPanel::new())]);

    let surface = dock_state.main_surface_mut();

    // Artifacts on the right
    let [viewport, _right] = surface.split_right(
        NodeIndex::root(),
        0.72,
        vec![PanelType::Artifacts(ArtifactsPanel::new())],
    );

    // Build log below the viewport
    let [_viewport, _log] = surface.split_below(
        viewport,
        0.75,
        vec![PanelType::BuildLog(BuildLogPanel::new())],
    );

    dock_state
}
