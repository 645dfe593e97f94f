//! Action handling module
//!
//! Actions are queued in AppState by the menu and panels and processed at the
//! start of each frame.

mod demo;
mod selection;
mod view;

use crate::state::{AppAction, SharedAppState, SharedViewportState};

pub use demo::{ActionError, advance_stage, export_solid_stl, handle_demo_action, reset_demo};
pub use selection::{handle_selection_action, select_shape};
pub use view::handle_view_action;

/// Context for action handlers
pub struct ActionContext<'a> {
    pub app_state: &'a SharedAppState,
    pub viewport_state: &'a Option<SharedViewportState>,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        app_state: &'a SharedAppState,
        viewport_state: &'a Option<SharedViewportState>,
    ) -> Self {
        Self {
            app_state,
            viewport_state,
        }
    }
}

/// Dispatch an action to the appropriate handler
pub fn dispatch_action(action: AppAction, ctx: &ActionContext) {
    match action {
        AppAction::AdvanceStage
        | AppAction::ResetDemo
        | AppAction::ClearViewport
        | AppAction::ExportSolidStl(_) => {
            handle_demo_action(action, ctx);
        }

        AppAction::FitAll | AppAction::SetView(_) => {
            handle_view_action(action, ctx);
        }

        AppAction::SelectShape(_) => {
            handle_selection_action(action, ctx);
        }
    }
}
