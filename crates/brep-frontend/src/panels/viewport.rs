//! 3D Viewport panel

use crate::panels::Panel;
use crate::state::{AppAction, SharedAppState, SharedViewportState, ViewPreset};

/// Radians of orbit per dragged pixel
const ORBIT_SENSITIVITY: f32 = 0.005;
/// Zoom units per scrolled point
const SCROLL_ZOOM_SCALE: f32 = 0.01;

/// 3D viewport panel
#[derive(Default)]
pub struct ViewportPanel;

impl ViewportPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Panel for ViewportPanel {
    fn name(&self) -> &str {
        "Viewport"
    }

    fn ui(&mut self, ui: &mut egui::Ui, _app_state: &SharedAppState) {
        // Fallback when no render context
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, egui::Sense::hover());

        painter.rect_filled(response.rect, 0.0, egui::Color32::from_rgb(30, 30, 30));
        painter.text(
            response.rect.center(),
            egui::Align2::CENTER_CENTER,
            "3D Viewport\n(wgpu not available)",
            egui::FontId::proportional(16.0),
            egui::Color32::GRAY,
        );
    }

    fn ui_with_render_context(
        &mut self,
        ui: &mut egui::Ui,
        app_state: &SharedAppState,
        render_state: &egui_wgpu::RenderState,
        viewport_state: &SharedViewportState,
    ) {
        // Toolbar
        ui.horizontal(|ui| {
            let next = app_state.lock().next_stage();
            let label = if next.is_done() {
                "Next Step (done)".to_string()
            } else {
                format!("Next Step: {}", next)
            };
            if ui.button(label).clicked() {
                app_state.lock().queue_action(AppAction::AdvanceStage);
            }

            ui.separator();
            ui.label("View:");
            for (name, preset) in [
                ("Top", ViewPreset::Top),
                ("Front", ViewPreset::Front),
                ("Side", ViewPreset::Side),
            ] {
                if ui.button(name).clicked() {
                    app_state.lock().queue_action(AppAction::SetView(preset));
                }
            }
            if ui.button("Fit All").clicked() {
                app_state.lock().queue_action(AppAction::FitAll);
            }

            ui.separator();
            let mut state = viewport_state.lock();
            let mut show_grid = state.renderer.show_grid();
            if ui.checkbox(&mut show_grid, "Grid").changed() {
                state.renderer.set_show_grid(show_grid);
            }
        });

        // Main viewport area
        let available_size = ui.available_size();
        let width = available_size.x as u32;
        let height = available_size.y as u32;

        if width == 0 || height == 0 {
            return;
        }

        // Ensure texture and render
        let texture_id = {
            let mut state = viewport_state.lock();
            let mut egui_renderer = render_state.renderer.write();
            let tex_id = state.ensure_texture(width, height, &mut egui_renderer);
            state.render();
            tex_id
        };

        // Display the rendered texture
        let response = ui.add(
            egui::Image::new(egui::load::SizedTexture::new(
                texture_id,
                [available_size.x, available_size.y],
            ))
            .sense(egui::Sense::click_and_drag()),
        );

        let mut vp_state = viewport_state.lock();

        // Left click: pick the shape under the cursor
        if response.clicked()
            && let Some(pos) = response.interact_pointer_pos()
        {
            let local = pos - response.rect.min;
            let size = response.rect.size();
            let hit = vp_state.renderer.pick(local.x, local.y, size.x, size.y);
            app_state.lock().queue_action(AppAction::SelectShape(hit));
        }

        let camera = vp_state.renderer.camera_mut();

        // Middle mouse: orbit, or pan with shift
        if response.dragged_by(egui::PointerButton::Middle) {
            let delta = response.drag_delta();
            if ui.input(|i| i.modifiers.shift) {
                camera.pan(delta.x, delta.y);
            } else {
                camera.orbit(-delta.x * ORBIT_SENSITIVITY, delta.y * ORBIT_SENSITIVITY);
            }
        }

        // Right mouse button for orbit as well
        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            camera.orbit(-delta.x * ORBIT_SENSITIVITY, delta.y * ORBIT_SENSITIVITY);
        }

        // Zoom with scroll
        if response.hovered() {
            let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll_delta != 0.0 {
                camera.zoom(scroll_delta * SCROLL_ZOOM_SCALE);
            }
        }

        // Keep repainting while the camera moves
        if response.dragged() || response.hovered() {
            ui.ctx().request_repaint();
        }
    }
}
