//! Camera actions

use crate::state::AppAction;

use super::ActionContext;

/// Handle camera actions
pub fn handle_view_action(action: AppAction, ctx: &ActionContext) {
    let Some(viewport_state) = ctx.viewport_state else {
        tracing::debug!("No viewport, ignoring {:?}", action);
        return;
    };
    let mut viewport = viewport_state.lock();

    match action {
        AppAction::FitAll => viewport.fit_all(),
        AppAction::SetView(preset) => viewport.set_view(preset),
        _ => {}
    }
}
