//! Core data model for the BRep stage demo
//!
//! This crate provides:
//! - `BuildStage` and its transition table
//! - The write-once `ArtifactStore` of named points and shape handles
//! - `StageSequencer`, which runs one construction step per activation
//! - `DemoConfig`, loaded from a RON file

pub mod artifact;
pub mod config;
pub mod sequencer;
pub mod stage;

pub use artifact::{
    Artifact, ArtifactError, ArtifactKind, ArtifactName, ArtifactStore, CornerIndex, FaceSide,
};
pub use config::{BoxDimensions, CONFIG_FILE_NAME, ConfigError, DemoConfig};
pub use sequencer::{SequencerError, StageSequencer, StepReport, Viewer};
pub use stage::{BuildStage, TRANSITIONS};
