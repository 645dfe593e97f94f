//! Artifacts panel

use crate::panels::Panel;
use crate::state::SharedAppState;

/// Artifact list in construction order with topology and mass properties
#[derive(Default)]
pub struct ArtifactsPanel;

impl ArtifactsPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Panel for ArtifactsPanel {
    fn name(&self) -> &str {
        "Artifacts"
    }

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        let state = app_state.lock();

        ui.label(format!(
            "Completed {} of 6 steps, kernel: {}",
            state.next_stage().index(),
            state.kernel.name()
        ));
        ui.separator();

        if state.summaries().is_empty() {
            ui.weak("Nothing built yet. Use BRep Demo > Next Step.");
            return;
        }

        let store = state.sequencer.store();
        let shown: Vec<String> = state
            .displayed
            .iter()
            .filter_map(|shape| store.name_of_shape(shape))
            .map(|name| name.to_string())
            .collect();
        let selected = state.selected_name().map(|name| name.to_string());

        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .show(ui, |ui| {
                egui::Grid::new("artifact_grid")
                    .num_columns(3)
                    .striped(true)
                    .show(ui, |ui| {
                        ui.strong("Name");
                        ui.strong("Kind");
                        ui.strong("Details");
                        ui.end_row();

                        for summary in state.summaries() {
                            // Displayed shapes in bold, the picked one highlighted
                            if selected.as_ref() == Some(&summary.name) {
                                ui.label(
                                    egui::RichText::new(&summary.name)
                                        .strong()
                                        .background_color(ui.visuals().selection.bg_fill),
                                );
                            } else if shown.contains(&summary.name) {
                                ui.strong(&summary.name);
                            } else {
                                ui.label(&summary.name);
                            }
                            ui.label(summary.kind.to_string());
                            ui.label(&summary.detail);
                            ui.end_row();
                        }
                    });

                if let Some(props) = state.solid_properties() {
                    ui.separator();
                    ui.heading("Solid");
                    egui::Grid::new("mass_grid").num_columns(2).show(ui, |ui| {
                        ui.label("Volume");
                        ui.label(format!("{:.3}", props.volume));
                        ui.end_row();
                        ui.label("Surface area");
                        ui.label(format!("{:.3}", props.surface_area));
                        ui.end_row();
                        let c = props.center_of_mass;
                        ui.label("Center of mass");
                        ui.label(format!("({:.3}, {:.3}, {:.3})", c.x, c.y, c.z));
                        ui.end_row();
                    });
                }
            });
    }
}
