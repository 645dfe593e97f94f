//! Stage sequencer
//!
//! Each call to [`StageSequencer::advance`] runs exactly one construction
//! step through the kernel, stores its artifacts and refreshes the viewer.
//! A failing step leaves the stage and the store untouched so it can be
//! retried.

use brep_kernel::{BrepKernel, FaceHandle, KernelError, ShapeHandle};
use glam::Vec3;

use crate::artifact::{Artifact, ArtifactError, ArtifactName, ArtifactStore, CornerIndex, FaceSide};
use crate::config::{BoxDimensions, DemoConfig};
use crate::stage::BuildStage;

/// Display surface for kernel shapes
pub trait Viewer {
    /// Remove every displayed shape
    fn erase_all(&mut self);

    /// Show a shape; `update` refreshes the view (and refits the camera)
    fn display(&mut self, shape: ShapeHandle, update: bool);
}

/// Sequencer errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum SequencerError {
    #[error("Kernel error: {0}")]
    Kernel(#[from] KernelError),
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),
}

/// Outcome of one activation
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Stage that ran
    pub stage: BuildStage,
    /// Activation count after this step
    pub activation: u64,
    /// Status line
    pub message: String,
}

/// Artifacts produced by one stage, not yet committed
type StageOutput = Vec<(ArtifactName, Artifact)>;

/// Shapes shown after a stage; `None` leaves the viewer untouched
fn display_set(stage: BuildStage) -> Option<Vec<ArtifactName>> {
    use ArtifactName::Face;
    let names = match stage {
        BuildStage::Vertices => vec![],
        BuildStage::BottomFace => vec![Face(FaceSide::Bottom)],
        BuildStage::TopFace => vec![Face(FaceSide::Bottom), Face(FaceSide::Top)],
        BuildStage::SideFaces => vec![
            Face(FaceSide::Front),
            Face(FaceSide::Right),
            Face(FaceSide::Back),
            Face(FaceSide::Left),
            Face(FaceSide::Bottom),
            Face(FaceSide::Top),
        ],
        BuildStage::Sew => vec![ArtifactName::Shell],
        BuildStage::Solidify => vec![ArtifactName::Solid],
        BuildStage::Done => return None,
    };
    Some(names)
}

/// Drives the box construction one stage at a time
#[derive(Debug, Clone)]
pub struct StageSequencer {
    stage: BuildStage,
    activations: u64,
    store: ArtifactStore,
    dimensions: BoxDimensions,
    sewing_tolerance: f32,
}

impl Default for StageSequencer {
    fn default() -> Self {
        Self::from_config(&DemoConfig::default())
    }
}

impl StageSequencer {
    pub fn new(dimensions: BoxDimensions, sewing_tolerance: f32) -> Self {
        Self {
            stage: BuildStage::default(),
            activations: 0,
            store: ArtifactStore::new(),
            dimensions,
            sewing_tolerance,
        }
    }

    pub fn from_config(config: &DemoConfig) -> Self {
        Self::new(config.dimensions, config.sewing_tolerance)
    }

    /// Stage the next activation will run
    pub fn stage(&self) -> BuildStage {
        self.stage
    }

    /// Number of successful activations
    pub fn activations(&self) -> u64 {
        self.activations
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    pub fn dimensions(&self) -> BoxDimensions {
        self.dimensions
    }

    /// Run the current stage
    pub fn advance(
        &mut self,
        kernel: &dyn BrepKernel,
        viewer: &mut dyn Viewer,
    ) -> Result<StepReport, SequencerError> {
        let stage = self.stage;

        let output = match self.build(stage, kernel) {
            Ok(output) => output,
            Err(e) => {
                tracing::error!("Step {} ({}) failed: {}", stage.index(), stage, e);
                return Err(e);
            }
        };
        let message = self.describe(stage, &output);
        self.commit(output)?;

        if let Some(names) = display_set(stage) {
            let shapes = names
                .into_iter()
                .map(|name| self.store.shape(name))
                .collect::<Result<Vec<_>, _>>()?;
            viewer.erase_all();
            let count = shapes.len();
            for (i, shape) in shapes.into_iter().enumerate() {
                viewer.display(shape, i + 1 == count);
            }
        }

        self.activations += 1;
        self.stage = stage.next();
        tracing::info!("{}", message);

        Ok(StepReport {
            stage,
            activation: self.activations,
            message,
        })
    }

    /// Produce the artifacts of a stage without touching the store
    fn build(&self, stage: BuildStage, kernel: &dyn BrepKernel) -> Result<StageOutput, SequencerError> {
        Ok(match stage {
            BuildStage::Vertices => CornerIndex::all()
                .zip(self.dimensions.corners())
                .map(|(corner, p)| (ArtifactName::Point(corner), Artifact::Point(p)))
                .collect(),
            BuildStage::BottomFace => self.build_faces(&[FaceSide::Bottom], kernel)?,
            BuildStage::TopFace => self.build_faces(&[FaceSide::Top], kernel)?,
            BuildStage::SideFaces => self.build_faces(&FaceSide::SIDES, kernel)?,
            BuildStage::Sew => {
                let faces = FaceSide::SIDES
                    .iter()
                    .chain(&[FaceSide::Bottom, FaceSide::Top])
                    .map(|side| self.store.face(ArtifactName::Face(*side)))
                    .collect::<Result<Vec<FaceHandle>, _>>()?;
                let shell = kernel.sew(&faces, self.sewing_tolerance)?;
                vec![(ArtifactName::Shell, Artifact::Shell(shell))]
            }
            BuildStage::Solidify => {
                let shell = self.store.shell(ArtifactName::Shell)?;
                let solid = kernel.make_solid(&shell)?;
                vec![(ArtifactName::Solid, Artifact::Solid(solid))]
            }
            BuildStage::Done => vec![],
        })
    }

    /// Build faces in order; on failure, release the ones already created
    fn build_faces(
        &self,
        sides: &[FaceSide],
        kernel: &dyn BrepKernel,
    ) -> Result<StageOutput, SequencerError> {
        let mut output = Vec::with_capacity(sides.len());
        for side in sides {
            let face = self
                .side_points(*side)
                .map_err(SequencerError::from)
                .and_then(|points| kernel.make_face(&points).map_err(SequencerError::from));
            match face {
                Ok(face) => output.push((ArtifactName::Face(*side), Artifact::Face(face))),
                Err(e) => {
                    for (_, artifact) in &output {
                        if let Some(shape) = artifact.shape() {
                            kernel.release(&shape);
                        }
                    }
                    return Err(e);
                }
            }
        }
        Ok(output)
    }

    fn side_points(&self, side: FaceSide) -> Result<Vec<Vec3>, ArtifactError> {
        side.corners()
            .iter()
            .map(|corner| self.store.point(ArtifactName::Point(*corner)))
            .collect()
    }

    fn commit(&mut self, output: StageOutput) -> Result<(), ArtifactError> {
        if let Some((name, _)) = output.iter().find(|(name, _)| self.store.contains(*name)) {
            return Err(ArtifactError::AlreadyWritten(*name));
        }
        for (name, artifact) in output {
            self.store.insert(name, artifact)?;
        }
        Ok(())
    }

    fn describe(&self, stage: BuildStage, output: &StageOutput) -> String {
        let step = stage.index();
        let next = stage.next();
        match stage {
            BuildStage::Vertices => {
                let BoxDimensions { dx, dy, dz } = self.dimensions;
                format!(
                    "Step {step}: created {} vertices of a {dx} x {dy} x {dz} box. Next: {next}",
                    output.len()
                )
            }
            BuildStage::BottomFace | BuildStage::TopFace | BuildStage::SideFaces => {
                let names: Vec<String> = output.iter().map(|(name, _)| name.to_string()).collect();
                format!("Step {step}: built {}. Next: {next}", names.join(", "))
            }
            BuildStage::Sew => format!("Step {step}: sewed 6 faces into a shell. Next: {next}"),
            BuildStage::Solidify => format!("Step {step}: converted the shell into a solid. Done"),
            BuildStage::Done => "All steps are complete".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brep_kernel::{NullKernel, ShapeKind};

    #[derive(Default)]
    struct Recorder {
        erased: usize,
        shown: Vec<(ShapeKind, bool)>,
    }

    impl Viewer for Recorder {
        fn erase_all(&mut self) {
            self.erased += 1;
            self.shown.clear();
        }

        fn display(&mut self, shape: ShapeHandle, update: bool) {
            self.shown.push((shape.kind(), update));
        }
    }

    #[test]
    fn test_vertices_stage_needs_no_kernel() {
        let mut sequencer = StageSequencer::default();
        let mut viewer = Recorder::default();

        let report = sequencer.advance(&NullKernel, &mut viewer).unwrap();
        assert_eq!(report.stage, BuildStage::Vertices);
        assert_eq!(report.activation, 1);
        assert_eq!(sequencer.stage(), BuildStage::BottomFace);
        assert_eq!(sequencer.store().len(), 8);
        assert_eq!(viewer.erased, 1);
        assert!(viewer.shown.is_empty());

        let p6 = sequencer
            .store()
            .point(ArtifactName::Point(CornerIndex::new(6).unwrap()))
            .unwrap();
        assert_eq!(p6, Vec3::new(100.0, 60.0, 30.0));
    }

    #[test]
    fn test_kernel_failure_keeps_state() {
        let mut sequencer = StageSequencer::default();
        let mut viewer = Recorder::default();
        sequencer.advance(&NullKernel, &mut viewer).unwrap();

        for _ in 0..3 {
            let err = sequencer.advance(&NullKernel, &mut viewer).unwrap_err();
            assert!(matches!(
                err,
                SequencerError::Kernel(KernelError::KernelNotAvailable(_))
            ));
        }
        assert_eq!(sequencer.stage(), BuildStage::BottomFace);
        assert_eq!(sequencer.activations(), 1);
        assert_eq!(sequencer.store().len(), 8);
        assert_eq!(viewer.erased, 1);
    }

    #[test]
    fn test_display_sets() {
        assert_eq!(display_set(BuildStage::Vertices), Some(vec![]));
        assert_eq!(display_set(BuildStage::SideFaces).map(|s| s.len()), Some(6));
        assert_eq!(display_set(BuildStage::Sew), Some(vec![ArtifactName::Shell]));
        assert_eq!(display_set(BuildStage::Done), None);
    }
}
