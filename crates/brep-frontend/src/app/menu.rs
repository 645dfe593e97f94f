//! Menu bar rendering

use crate::state::{AppAction, SharedAppState, ViewPreset};

/// Actions triggered by the menu that the app handles itself
pub enum MenuAction {
    ResetLayout,
}

/// Render the menu bar and return any triggered action
pub fn render_menu_bar(ctx: &egui::Context, app_state: &SharedAppState) -> Option<MenuAction> {
    let mut menu_action = None;

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("BRep Demo", |ui| {
                if ui.button("Next Step").clicked() {
                    app_state.lock().queue_action(AppAction::AdvanceStage);
                    ui.close_menu();
                }
                if ui.button("Reset Demo").clicked() {
                    app_state.lock().queue_action(AppAction::ResetDemo);
                    ui.close_menu();
                }
                if ui.button("Clear Viewport").clicked() {
                    app_state.lock().queue_action(AppAction::ClearViewport);
                    ui.close_menu();
                }
                ui.separator();

                let has_solid = app_state.lock().has_solid();
                if ui
                    .add_enabled(has_solid, egui::Button::new("Export Solid as STL..."))
                    .clicked()
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("STL files", &["stl", "STL"])
                        .set_file_name("box.stl")
                        .save_file()
                    {
                        app_state
                            .lock()
                            .queue_action(AppAction::ExportSolidStl(path));
                    }
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Fit All").clicked() {
                    app_state.lock().queue_action(AppAction::FitAll);
                    ui.close_menu();
                }
                for (name, preset) in [
                    ("Top", ViewPreset::Top),
                    ("Front", ViewPreset::Front),
                    ("Side", ViewPreset::Side),
                ] {
                    if ui.button(name).clicked() {
                        app_state.lock().queue_action(AppAction::SetView(preset));
                        ui.close_menu();
                    }
                }
                ui.separator();
                if ui.button("Reset Layout").clicked() {
                    menu_action = Some(MenuAction::ResetLayout);
                    ui.close_menu();
                }
            });
        });
    });

    menu_action
}
