//! Viewport selection

use uuid::Uuid;

use crate::state::{AppAction, AppState};

use super::ActionContext;

/// Handle selection actions
pub fn handle_selection_action(action: AppAction, ctx: &ActionContext) {
    if let AppAction::SelectShape(id) = action {
        select_shape(&mut ctx.app_state.lock(), id);
    }
}

/// Select a picked shape and report its artifact name in the build log
pub fn select_shape(state: &mut AppState, id: Option<Uuid>) {
    let previous = state.selected();
    let Some(shape) = state.select_shape(id) else {
        if previous.is_some() {
            state.log_info("Selection cleared");
        }
        return;
    };

    let message = match state.selected_name() {
        Some(name) => format!("Selected {} ({})", name, shape.kind()),
        None => format!("Selected {} {}", shape.kind(), shape.id()),
    };
    state.log_info(message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use brep_core::DemoConfig;

    use crate::actions::advance_stage;

    #[test]
    fn test_select_reports_artifact_name() {
        let mut state = AppState::new(DemoConfig::default());
        for _ in 0..4 {
            advance_stage(&mut state, None).unwrap();
        }

        // Side faces come first in the display order
        let front = state.displayed[0];
        select_shape(&mut state, Some(front.id()));
        assert_eq!(state.selected(), Some(front));
        assert_eq!(state.last_status().unwrap().message, "Selected face_front (face)");

        // Sewing replaces the faces with the shell
        advance_stage(&mut state, None).unwrap();
        assert_eq!(state.selected(), None);

        let shell = state.displayed[0];
        select_shape(&mut state, Some(shell.id()));
        assert_eq!(state.selected_name().map(|n| n.to_string()).as_deref(), Some("shell"));
    }

    #[test]
    fn test_clicking_empty_space_clears_selection_once() {
        let mut state = AppState::new(DemoConfig::default());
        advance_stage(&mut state, None).unwrap();
        advance_stage(&mut state, None).unwrap();

        let bottom = state.displayed[0];
        select_shape(&mut state, Some(bottom.id()));
        let logged = state.build_log().len();

        select_shape(&mut state, None);
        assert_eq!(state.last_status().unwrap().message, "Selection cleared");
        select_shape(&mut state, None);
        assert_eq!(state.build_log().len(), logged + 1);
    }
}
