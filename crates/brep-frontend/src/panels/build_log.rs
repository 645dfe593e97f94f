//! Build log panel

use crate::panels::Panel;
use crate::state::{LogLevel, SharedAppState};

/// Status lines from each activation
#[derive(Default)]
pub struct BuildLogPanel;

impl BuildLogPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Panel for BuildLogPanel {
    fn name(&self) -> &str {
        "Build Log"
    }

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        let mut state = app_state.lock();

        ui.horizontal(|ui| {
            ui.label(format!("{} entries", state.build_log().len()));
            if ui.small_button("Clear").clicked() {
                state.clear_log();
            }
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for entry in state.build_log() {
                    match entry.level {
                        LogLevel::Info => {
                            ui.label(&entry.message);
                        }
                        LogLevel::Error => {
                            ui.colored_label(ui.visuals().error_fg_color, &entry.message);
                        }
                    }
                }
            });
    }
}
