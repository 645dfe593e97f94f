//! Demo stepping, reset and export actions

use std::path::Path;

use brep_core::{ArtifactError, ArtifactName, SequencerError, StepReport};
use brep_kernel::{KernelError, ShapeHandle, export_stl};

use crate::state::{AppAction, AppState, ViewportState};
use crate::viewer::KernelViewer;

use super::ActionContext;

/// Errors from user-triggered actions outside the sequencer
#[derive(Debug, Clone, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Kernel(#[from] KernelError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Handle demo actions
pub fn handle_demo_action(action: AppAction, ctx: &ActionContext) {
    let mut app = ctx.app_state.lock();
    let mut viewport = ctx.viewport_state.as_ref().map(|vp| vp.lock());

    match action {
        AppAction::AdvanceStage => match advance_stage(&mut app, viewport.as_deref_mut()) {
            Ok(report) => tracing::debug!(
                "Activation {} ran {}, next {}",
                report.activation,
                report.stage,
                app.next_stage()
            ),
            Err(e) => tracing::debug!("Stage left at {} after error: {}", app.next_stage(), e),
        },
        AppAction::ResetDemo => reset_demo(&mut app, viewport.as_deref_mut()),
        AppAction::ClearViewport => {
            app.displayed.clear();
            app.retain_selection();
            if let Some(vp) = viewport.as_deref_mut() {
                vp.clear_shapes();
            }
            app.log_info("Viewport cleared");
        }
        AppAction::ExportSolidStl(path) => match export_solid_stl(&app, &path) {
            Ok(triangles) => app.log_info(format!(
                "Exported solid ({} triangles) to {}",
                triangles,
                path.display()
            )),
            Err(e) => app.log_error(format!("STL export failed: {}", e)),
        },
        _ => {}
    }
}

/// Run one sequencer activation and record its outcome in the build log
pub fn advance_stage(
    state: &mut AppState,
    viewport: Option<&mut ViewportState>,
) -> Result<StepReport, SequencerError> {
    let stage = state.next_stage();

    let mut viewer = KernelViewer::new(
        state.kernel.as_ref(),
        viewport,
        &state.config,
        &mut state.displayed,
    );
    let result = state.sequencer.advance(state.kernel.as_ref(), &mut viewer);
    let display_errors = viewer.into_errors();

    match &result {
        Ok(report) => state.log_info(report.message.clone()),
        Err(e) => state.log_error(format!("Step {} ({}) failed: {}", stage.index(), stage, e)),
    }
    for message in display_errors {
        state.log_error(message);
    }

    state.retain_selection();
    state.refresh_summaries();
    result
}

/// Start the demo over from the first stage
pub fn reset_demo(state: &mut AppState, viewport: Option<&mut ViewportState>) {
    state.reset();
    if let Some(vp) = viewport {
        vp.clear_shapes();
    }
    state.log_info(format!("Demo reset. Next: {}", state.next_stage()));
}

/// Tessellate the solid and write it as binary STL, returning the triangle count
pub fn export_solid_stl(state: &AppState, path: &Path) -> Result<usize, ActionError> {
    let solid = state.sequencer.store().solid(ArtifactName::Solid)?;
    let mesh = state.kernel.tessellate(&ShapeHandle::Solid(solid))?;
    export_stl(&mesh, path)?;
    Ok(mesh.triangle_count())
}
