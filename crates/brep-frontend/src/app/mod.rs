//! Main application module

mod dock;
mod menu;

use std::sync::Arc;

use egui_dock::{DockArea, DockState, Style};
use parking_lot::Mutex;

use brep_core::{CONFIG_FILE_NAME, DemoConfig};

use crate::actions::{ActionContext, dispatch_action};
use crate::state::{LogLevel, SharedAppState, SharedViewportState, ViewportState, create_shared_state};

pub use dock::{DemoTabViewer, PanelType, create_dock_layout};
pub use menu::{MenuAction, render_menu_bar};

/// Main application
pub struct BrepDemoApp {
    dock_state: DockState<PanelType>,
    app_state: SharedAppState,
    viewport_state: Option<SharedViewportState>,
}

impl BrepDemoApp {
    /// Create a new app
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Create viewport state if WGPU is available
        let viewport_state = cc.wgpu_render_state.as_ref().map(|render_state| {
            let device = render_state.device.clone();
            let queue = render_state.queue.clone();
            let format = render_state.target_format;

            Arc::new(Mutex::new(ViewportState::new(device, queue, format)))
        });
        if viewport_state.is_none() {
            tracing::warn!("wgpu render state unavailable; viewport disabled");
        }

        let config = DemoConfig::load_or_default(CONFIG_FILE_NAME);
        let app_state = create_shared_state(config);
        {
            let mut state = app_state.lock();
            let next = state.next_stage();
            state.log_info(format!("Ready. Use BRep Demo > Next Step. Next: {}", next));
        }

        Self {
            dock_state: create_dock_layout(),
            app_state,
            viewport_state,
        }
    }

    /// Process pending actions
    fn process_actions(&mut self) {
        let actions = self.app_state.lock().take_pending_actions();
        let ctx = ActionContext::new(&self.app_state, &self.viewport_state);

        for action in actions {
            dispatch_action(action, &ctx);
        }
    }

    /// Latest status line and the next stage
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let state = self.app_state.lock();
                if let Some(entry) = state.last_status() {
                    match entry.level {
                        LogLevel::Info => ui.label(&entry.message),
                        LogLevel::Error => {
                            ui.colored_label(ui.visuals().error_fg_color, &entry.message)
                        }
                    };
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Next: {}", state.next_stage()));
                    if let Some(name) = state.selected_name() {
                        ui.separator();
                        ui.strong(format!("Selected: {}", name));
                    }
                });
            });
        });
    }
}

impl eframe::App for BrepDemoApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        // Process pending actions
        self.process_actions();

        // Menu bar
        if let Some(menu_action) = render_menu_bar(ctx, &self.app_state) {
            match menu_action {
                MenuAction::ResetLayout => {
                    self.dock_state = create_dock_layout();
                }
            }
        }

        self.show_status_bar(ctx);

        // Dock area
        let render_state = frame.wgpu_render_state();

        DockArea::new(&mut self.dock_state)
            .style(Style::from_egui(ctx.style().as_ref()))
            .show(
                ctx,
                &mut DemoTabViewer {
                    app_state: &self.app_state,
                    render_state,
                    viewport_state: &self.viewport_state,
                },
            );

        // Actions queued this frame run on the next one
        if self.app_state.lock().has_pending_actions() {
            ctx.request_repaint();
        }
    }
}
