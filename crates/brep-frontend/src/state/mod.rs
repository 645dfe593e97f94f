//! Application state module

mod summary;
mod viewport;

pub use summary::{ArtifactSummary, summarize_artifacts};
pub use viewport::{SharedViewportState, ViewportState};

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use brep_core::{ArtifactName, BuildStage, DemoConfig, StageSequencer};
use brep_kernel::{BrepKernel, MassProperties, ShapeHandle, default_kernel};

/// Actions that can be performed on the app state
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Demo actions
    /// Run the next construction stage
    AdvanceStage,
    /// Start over with an empty kernel
    ResetDemo,
    /// Erase every displayed shape
    ClearViewport,
    /// Write the solid to a binary STL file
    ExportSolidStl(PathBuf),

    // View actions
    /// Frame all displayed shapes
    FitAll,
    /// Switch to a standard view
    SetView(ViewPreset),

    // Selection
    /// Select the displayed shape with this id, or clear the selection
    SelectShape(Option<Uuid>),
}

/// Standard camera orientations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPreset {
    Top,
    Front,
    Side,
}

/// Severity of a build log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

/// One line of the build log
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Application state
pub struct AppState {
    /// Stage sequencer owning the artifact store
    pub sequencer: StageSequencer,
    /// Geometry kernel
    pub kernel: Box<dyn BrepKernel>,
    /// Settings loaded at startup
    pub config: DemoConfig,
    /// Shapes currently shown in the viewport, in display order
    pub displayed: Vec<ShapeHandle>,
    /// Shape picked in the viewport
    selected: Option<ShapeHandle>,
    /// Artifact list shown in the artifacts panel
    summaries: Vec<ArtifactSummary>,
    /// Mass properties of the solid, once built
    solid_properties: Option<MassProperties>,
    /// Status lines from each step
    build_log: Vec<LogEntry>,
    /// Pending actions
    pending_actions: Vec<AppAction>,
}

impl AppState {
    /// Create a new app state with the default kernel
    pub fn new(config: DemoConfig) -> Self {
        Self::with_kernel(config, default_kernel())
    }

    /// Create a new app state around a specific kernel
    pub fn with_kernel(config: DemoConfig, kernel: Box<dyn BrepKernel>) -> Self {
        if !kernel.is_available() {
            tracing::warn!("Geometry kernel '{}' is not available", kernel.name());
        }
        Self {
            sequencer: StageSequencer::from_config(&config),
            kernel,
            config,
            displayed: Vec::new(),
            selected: None,
            summaries: Vec::new(),
            solid_properties: None,
            build_log: Vec::new(),
            pending_actions: Vec::new(),
        }
    }

    /// Queue an action
    pub fn queue_action(&mut self, action: AppAction) {
        self.pending_actions.push(action);
    }

    /// Take pending actions
    pub fn take_pending_actions(&mut self) -> Vec<AppAction> {
        std::mem::take(&mut self.pending_actions)
    }

    pub fn has_pending_actions(&self) -> bool {
        !self.pending_actions.is_empty()
    }

    /// Append a status line
    pub fn log_info(&mut self, message: impl Into<String>) {
        self.build_log.push(LogEntry {
            level: LogLevel::Info,
            message: message.into(),
        });
    }

    /// Append an error line
    pub fn log_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("{}", message);
        self.build_log.push(LogEntry {
            level: LogLevel::Error,
            message,
        });
    }

    pub fn build_log(&self) -> &[LogEntry] {
        &self.build_log
    }

    pub fn clear_log(&mut self) {
        self.build_log.clear();
    }

    /// Latest status line
    pub fn last_status(&self) -> Option<&LogEntry> {
        self.build_log.last()
    }

    /// Stage the next activation will run
    pub fn next_stage(&self) -> BuildStage {
        self.sequencer.stage()
    }

    pub fn summaries(&self) -> &[ArtifactSummary] {
        &self.summaries
    }

    pub fn solid_properties(&self) -> Option<&MassProperties> {
        self.solid_properties.as_ref()
    }

    /// Whether the solid exists and can be exported
    pub fn has_solid(&self) -> bool {
        self.sequencer.store().contains(ArtifactName::Solid)
    }

    /// Select the displayed shape whose kernel id is `id`
    ///
    /// Ids of shapes that are not displayed clear the selection.
    pub fn select_shape(&mut self, id: Option<Uuid>) -> Option<ShapeHandle> {
        self.selected = id.and_then(|id| self.displayed.iter().copied().find(|s| s.id() == id));
        self.selected
    }

    pub fn selected(&self) -> Option<ShapeHandle> {
        self.selected
    }

    /// Artifact name of the selected shape
    pub fn selected_name(&self) -> Option<ArtifactName> {
        self.selected
            .and_then(|shape| self.sequencer.store().name_of_shape(&shape))
    }

    /// Drop the selection once its shape is no longer displayed
    pub fn retain_selection(&mut self) {
        if let Some(shape) = self.selected
            && !self.displayed.contains(&shape)
        {
            self.selected = None;
        }
    }

    /// Recompute the artifact list and the solid's mass properties
    pub fn refresh_summaries(&mut self) {
        self.summaries = summarize_artifacts(self.sequencer.store(), self.kernel.as_ref());
        self.solid_properties = match self.sequencer.store().solid(ArtifactName::Solid) {
            Ok(solid) => match self.kernel.mass_properties(&solid) {
                Ok(props) => Some(props),
                Err(e) => {
                    tracing::warn!("Mass properties unavailable: {}", e);
                    None
                }
            },
            Err(_) => None,
        };
    }

    /// Discard all artifacts and kernel shapes
    pub fn reset(&mut self) {
        self.kernel.clear();
        self.sequencer = StageSequencer::from_config(&self.config);
        self.displayed.clear();
        self.selected = None;
        self.summaries.clear();
        self.solid_properties = None;
    }
}

/// Shared app state
pub type SharedAppState = Arc<Mutex<AppState>>;

/// Create a new shared app state
pub fn create_shared_state(config: DemoConfig) -> SharedAppState {
    Arc::new(Mutex::new(AppState::new(config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_actions_drain() {
        let mut state = AppState::new(DemoConfig::default());
        state.queue_action(AppAction::AdvanceStage);
        state.queue_action(AppAction::FitAll);
        assert_eq!(
            state.take_pending_actions(),
            vec![AppAction::AdvanceStage, AppAction::FitAll]
        );
        assert!(state.take_pending_actions().is_empty());
    }

    #[test]
    fn test_log_status() {
        let mut state = AppState::new(DemoConfig::default());
        assert!(state.last_status().is_none());
        state.log_info("first");
        state.log_error("second");
        let last = state.last_status().unwrap();
        assert_eq!(last.level, LogLevel::Error);
        assert_eq!(last.message, "second");
        assert_eq!(state.build_log().len(), 2);
    }

    #[test]
    fn test_selection_follows_display() {
        let mut state = AppState::new(DemoConfig::default());
        let face = ShapeHandle::Face(brep_kernel::FaceHandle::new(Uuid::from_u128(7)));
        assert_eq!(state.select_shape(Some(face.id())), None);

        state.displayed.push(face);
        assert_eq!(state.select_shape(Some(face.id())), Some(face));
        assert_eq!(state.selected(), Some(face));
        // Not stored as an artifact
        assert_eq!(state.selected_name(), None);

        state.displayed.clear();
        state.retain_selection();
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_fresh_state() {
        let state = AppState::new(DemoConfig::default());
        assert_eq!(state.next_stage(), BuildStage::Vertices);
        assert!(!state.has_solid());
        assert!(state.summaries().is_empty());
    }
}
