//! End-to-end runs of the stage sequencer against the truck kernel

use approx::assert_relative_eq;
use brep_core::{
    ArtifactKind, ArtifactName, BoxDimensions, BuildStage, CornerIndex, FaceSide, SequencerError,
    StageSequencer, Viewer,
};
use brep_kernel::{BrepKernel, KernelError, ShapeHandle, ShapeKind, TruckKernel};
use glam::Vec3;

/// Viewer that records what is currently on screen
#[derive(Default)]
struct RecordingViewer {
    erase_count: usize,
    displayed: Vec<(ShapeHandle, bool)>,
}

impl RecordingViewer {
    fn kinds(&self) -> Vec<ShapeKind> {
        self.displayed.iter().map(|(shape, _)| shape.kind()).collect()
    }

    fn updates(&self) -> Vec<bool> {
        self.displayed.iter().map(|(_, update)| *update).collect()
    }
}

impl Viewer for RecordingViewer {
    fn erase_all(&mut self) {
        self.erase_count += 1;
        self.displayed.clear();
    }

    fn display(&mut self, shape: ShapeHandle, update: bool) {
        self.displayed.push((shape, update));
    }
}

fn run_steps(
    sequencer: &mut StageSequencer,
    kernel: &TruckKernel,
    viewer: &mut RecordingViewer,
    steps: usize,
) {
    for _ in 0..steps {
        sequencer.advance(kernel, viewer).unwrap();
    }
}

#[test]
fn test_full_sequence_builds_expected_artifacts() {
    let kernel = TruckKernel::new();
    let mut viewer = RecordingViewer::default();
    let mut sequencer = StageSequencer::default();

    run_steps(&mut sequencer, &kernel, &mut viewer, 6);

    let store = sequencer.store();
    assert_eq!(store.count(ArtifactKind::Point), 8);
    assert_eq!(store.count(ArtifactKind::Face), 6);
    assert_eq!(store.count(ArtifactKind::Shell), 1);
    assert_eq!(store.count(ArtifactKind::Solid), 1);
    assert_eq!(store.len(), 16);

    let order: Vec<String> = store.iter().map(|(name, _)| name.to_string()).collect();
    assert_eq!(
        order,
        vec![
            "p0", "p1", "p2", "p3", "p4", "p5", "p6", "p7", "face_bottom", "face_top",
            "face_front", "face_right", "face_back", "face_left", "shell", "solid",
        ]
    );
    assert_eq!(sequencer.stage(), BuildStage::Done);
}

#[test]
fn test_viewer_shows_each_stage() {
    let kernel = TruckKernel::new();
    let mut viewer = RecordingViewer::default();
    let mut sequencer = StageSequencer::default();

    run_steps(&mut sequencer, &kernel, &mut viewer, 1);
    assert!(viewer.displayed.is_empty());

    run_steps(&mut sequencer, &kernel, &mut viewer, 1);
    assert_eq!(viewer.kinds(), vec![ShapeKind::Face]);
    assert_eq!(viewer.updates(), vec![true]);

    run_steps(&mut sequencer, &kernel, &mut viewer, 1);
    assert_eq!(viewer.kinds(), vec![ShapeKind::Face; 2]);
    assert_eq!(viewer.updates(), vec![false, true]);

    run_steps(&mut sequencer, &kernel, &mut viewer, 1);
    assert_eq!(viewer.kinds(), vec![ShapeKind::Face; 6]);
    assert_eq!(viewer.updates(), vec![false, false, false, false, false, true]);
    let bottom = sequencer
        .store()
        .shape(ArtifactName::Face(FaceSide::Bottom))
        .unwrap();
    assert_eq!(viewer.displayed[4].0, bottom);

    run_steps(&mut sequencer, &kernel, &mut viewer, 1);
    assert_eq!(viewer.kinds(), vec![ShapeKind::Shell]);

    run_steps(&mut sequencer, &kernel, &mut viewer, 1);
    assert_eq!(viewer.kinds(), vec![ShapeKind::Solid]);
    assert_eq!(viewer.erase_count, 6);

    // The terminal stage leaves the viewer alone
    run_steps(&mut sequencer, &kernel, &mut viewer, 1);
    assert_eq!(viewer.kinds(), vec![ShapeKind::Solid]);
    assert_eq!(viewer.erase_count, 6);
}

#[test]
fn test_faces_and_shell_topology() {
    let kernel = TruckKernel::new();
    let mut viewer = RecordingViewer::default();
    let mut sequencer = StageSequencer::default();
    run_steps(&mut sequencer, &kernel, &mut viewer, 6);
    let store = sequencer.store();

    for side in [FaceSide::Bottom, FaceSide::Top]
        .into_iter()
        .chain(FaceSide::SIDES)
    {
        let face = store.face(ArtifactName::Face(side)).unwrap();
        let topo = kernel.face_topology(&face).unwrap();
        assert_eq!(topo.edge_count, 4, "{side:?}");
        assert!(topo.closed, "{side:?}");
    }

    let shell = store.shell(ArtifactName::Shell).unwrap();
    let topo = kernel.shell_topology(&shell).unwrap();
    assert_eq!(topo.face_count, 6);
    assert_eq!(topo.edge_count, 12);
    assert_eq!(topo.vertex_count, 8);
    assert!(topo.closed);

    let solid = store.solid(ArtifactName::Solid).unwrap();
    assert_eq!(kernel.solid_topology(&solid).unwrap().shell_count, 1);
}

#[test]
fn test_solid_mass_properties_match_box() {
    let kernel = TruckKernel::new();
    let mut viewer = RecordingViewer::default();
    let dims = BoxDimensions::new(100.0, 60.0, 30.0);
    let mut sequencer = StageSequencer::new(dims, 1e-6);
    run_steps(&mut sequencer, &kernel, &mut viewer, 6);

    let p6 = sequencer
        .store()
        .point(ArtifactName::Point(CornerIndex::new(6).unwrap()))
        .unwrap();
    assert_eq!(p6, Vec3::new(100.0, 60.0, 30.0));

    let solid = sequencer.store().solid(ArtifactName::Solid).unwrap();
    let props = kernel.mass_properties(&solid).unwrap();
    assert_relative_eq!(props.volume, 180_000.0, epsilon = 1e-6);
    assert_relative_eq!(
        props.surface_area,
        2.0 * (100.0 * 60.0 + 100.0 * 30.0 + 60.0 * 30.0),
        epsilon = 1e-6
    );
    assert_relative_eq!(props.center_of_mass.x, 50.0, epsilon = 1e-9);
    assert_relative_eq!(props.center_of_mass.y, 30.0, epsilon = 1e-9);
    assert_relative_eq!(props.center_of_mass.z, 15.0, epsilon = 1e-9);
}

#[test]
fn test_past_terminal_stage_is_noop() {
    let kernel = TruckKernel::new();
    let mut viewer = RecordingViewer::default();
    let mut sequencer = StageSequencer::default();
    run_steps(&mut sequencer, &kernel, &mut viewer, 6);

    let before: Vec<String> = sequencer
        .store()
        .iter()
        .map(|(name, _)| name.to_string())
        .collect();
    let shapes_before = kernel.shape_count();

    for i in 0..5 {
        let report = sequencer.advance(&kernel, &mut viewer).unwrap();
        assert_eq!(report.stage, BuildStage::Done);
        assert_eq!(report.activation, 7 + i);
    }

    let after: Vec<String> = sequencer
        .store()
        .iter()
        .map(|(name, _)| name.to_string())
        .collect();
    assert_eq!(before, after);
    assert_eq!(kernel.shape_count(), shapes_before);
    assert_eq!(sequencer.activations(), 11);
}

#[test]
fn test_degenerate_box_fails_without_advancing() {
    let kernel = TruckKernel::new();
    let mut viewer = RecordingViewer::default();
    // Flat box: the side faces collapse to lines
    let mut sequencer = StageSequencer::new(BoxDimensions::new(10.0, 10.0, 0.0), 1e-6);
    run_steps(&mut sequencer, &kernel, &mut viewer, 3);
    assert_eq!(sequencer.stage(), BuildStage::SideFaces);
    let stored = sequencer.store().len();
    let shapes = kernel.shape_count();

    let err = sequencer.advance(&kernel, &mut viewer).unwrap_err();
    assert!(matches!(
        err,
        SequencerError::Kernel(KernelError::OperationFailed(_))
    ));
    assert_eq!(sequencer.stage(), BuildStage::SideFaces);
    assert_eq!(sequencer.activations(), 3);
    assert_eq!(sequencer.store().len(), stored);
    assert_eq!(kernel.shape_count(), shapes);
}
