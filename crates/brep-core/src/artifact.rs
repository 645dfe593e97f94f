//! Named construction artifacts
//!
//! Every step of the demo writes its results under a fixed symbolic name
//! (`p0`..`p7`, `face_bottom`, ..., `shell`, `solid`). Later steps read them
//! back by name. Each name can be written once.

use std::fmt;

use brep_kernel::{FaceHandle, ShapeHandle, ShellHandle, SolidHandle};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Index of a box corner, `0..8`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CornerIndex(u8);

impl CornerIndex {
    pub const COUNT: usize = 8;

    /// Corner index, `None` when out of range
    pub fn new(index: usize) -> Option<Self> {
        (index < Self::COUNT).then_some(Self(index as u8))
    }

    /// All eight corners in order
    pub fn all() -> impl Iterator<Item = CornerIndex> {
        (0..Self::COUNT as u8).map(CornerIndex)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Face of the box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceSide {
    Bottom,
    Top,
    Front,
    Right,
    Back,
    Left,
}

impl FaceSide {
    /// Side faces in construction order
    pub const SIDES: [FaceSide; 4] = [
        FaceSide::Front,
        FaceSide::Right,
        FaceSide::Back,
        FaceSide::Left,
    ];

    /// Corner indices of the boundary, in edge order
    pub fn corners(self) -> [CornerIndex; 4] {
        let idx = match self {
            FaceSide::Bottom => [0, 1, 2, 3],
            FaceSide::Top => [4, 5, 6, 7],
            FaceSide::Front => [0, 1, 5, 4],
            FaceSide::Right => [1, 2, 6, 5],
            FaceSide::Back => [2, 3, 7, 6],
            FaceSide::Left => [3, 0, 4, 7],
        };
        idx.map(CornerIndex)
    }

    pub fn key(self) -> &'static str {
        match self {
            FaceSide::Bottom => "bottom",
            FaceSide::Top => "top",
            FaceSide::Front => "front",
            FaceSide::Right => "right",
            FaceSide::Back => "back",
            FaceSide::Left => "left",
        }
    }
}

/// Symbolic name of a stored artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactName {
    Point(CornerIndex),
    Face(FaceSide),
    Shell,
    Solid,
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactName::Point(corner) => write!(f, "p{}", corner.index()),
            ArtifactName::Face(side) => write!(f, "face_{}", side.key()),
            ArtifactName::Shell => f.write_str("shell"),
            ArtifactName::Solid => f.write_str("solid"),
        }
    }
}

/// Kind of a stored artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    Point,
    Face,
    Shell,
    Solid,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::Point => "point",
            ArtifactKind::Face => "face",
            ArtifactKind::Shell => "shell",
            ArtifactKind::Solid => "solid",
        };
        f.write_str(name)
    }
}

/// A point value or a kernel-owned shape handle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Artifact {
    Point(Vec3),
    Face(FaceHandle),
    Shell(ShellHandle),
    Solid(SolidHandle),
}

impl Artifact {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Artifact::Point(_) => ArtifactKind::Point,
            Artifact::Face(_) => ArtifactKind::Face,
            Artifact::Shell(_) => ArtifactKind::Shell,
            Artifact::Solid(_) => ArtifactKind::Solid,
        }
    }

    /// Shape handle, `None` for points
    pub fn shape(&self) -> Option<ShapeHandle> {
        match self {
            Artifact::Point(_) => None,
            Artifact::Face(h) => Some((*h).into()),
            Artifact::Shell(h) => Some((*h).into()),
            Artifact::Solid(h) => Some((*h).into()),
        }
    }
}

/// Artifact store errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact '{0}' has already been written")]
    AlreadyWritten(ArtifactName),
    #[error("Artifact '{0}' has not been built yet")]
    Missing(ArtifactName),
    #[error("Artifact '{name}' is a {found}, expected a {expected}")]
    WrongKind {
        name: ArtifactName,
        expected: ArtifactKind,
        found: ArtifactKind,
    },
}

/// Write-once store of named artifacts, in insertion order
#[derive(Debug, Clone, Default)]
pub struct ArtifactStore {
    entries: Vec<(ArtifactName, Artifact)>,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new artifact; a name can only be written once
    pub fn insert(&mut self, name: ArtifactName, artifact: Artifact) -> Result<(), ArtifactError> {
        if self.contains(name) {
            return Err(ArtifactError::AlreadyWritten(name));
        }
        self.entries.push((name, artifact));
        Ok(())
    }

    pub fn get(&self, name: ArtifactName) -> Option<&Artifact> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, artifact)| artifact)
    }

    pub fn contains(&self, name: ArtifactName) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order they were written
    pub fn iter(&self) -> impl Iterator<Item = &(ArtifactName, Artifact)> {
        self.entries.iter()
    }

    /// Number of artifacts of one kind
    pub fn count(&self, kind: ArtifactKind) -> usize {
        self.entries
            .iter()
            .filter(|(_, artifact)| artifact.kind() == kind)
            .count()
    }

    /// Name under which a shape was stored
    pub fn name_of_shape(&self, shape: &ShapeHandle) -> Option<ArtifactName> {
        self.entries
            .iter()
            .find(|(_, artifact)| artifact.shape().as_ref() == Some(shape))
            .map(|(name, _)| *name)
    }

    fn require(&self, name: ArtifactName) -> Result<&Artifact, ArtifactError> {
        self.get(name).ok_or(ArtifactError::Missing(name))
    }

    fn wrong_kind(name: ArtifactName, expected: ArtifactKind, found: &Artifact) -> ArtifactError {
        ArtifactError::WrongKind {
            name,
            expected,
            found: found.kind(),
        }
    }

    pub fn point(&self, name: ArtifactName) -> Result<Vec3, ArtifactError> {
        match self.require(name)? {
            Artifact::Point(p) => Ok(*p),
            other => Err(Self::wrong_kind(name, ArtifactKind::Point, other)),
        }
    }

    pub fn face(&self, name: ArtifactName) -> Result<FaceHandle, ArtifactError> {
        match self.require(name)? {
            Artifact::Face(h) => Ok(*h),
            other => Err(Self::wrong_kind(name, ArtifactKind::Face, other)),
        }
    }

    pub fn shell(&self, name: ArtifactName) -> Result<ShellHandle, ArtifactError> {
        match self.require(name)? {
            Artifact::Shell(h) => Ok(*h),
            other => Err(Self::wrong_kind(name, ArtifactKind::Shell, other)),
        }
    }

    pub fn solid(&self, name: ArtifactName) -> Result<SolidHandle, ArtifactError> {
        match self.require(name)? {
            Artifact::Solid(h) => Ok(*h),
            other => Err(Self::wrong_kind(name, ArtifactKind::Solid, other)),
        }
    }

    /// Shape handle of any kind; points have none
    pub fn shape(&self, name: ArtifactName) -> Result<ShapeHandle, ArtifactError> {
        let artifact = self.require(name)?;
        artifact
            .shape()
            .ok_or_else(|| Self::wrong_kind(name, ArtifactKind::Face, artifact))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner(i: usize) -> ArtifactName {
        ArtifactName::Point(CornerIndex::new(i).unwrap())
    }

    #[test]
    fn test_display_keys() {
        assert_eq!(corner(0).to_string(), "p0");
        assert_eq!(corner(7).to_string(), "p7");
        assert_eq!(ArtifactName::Face(FaceSide::Bottom).to_string(), "face_bottom");
        assert_eq!(ArtifactName::Face(FaceSide::Left).to_string(), "face_left");
        assert_eq!(ArtifactName::Shell.to_string(), "shell");
        assert_eq!(ArtifactName::Solid.to_string(), "solid");
        assert!(CornerIndex::new(8).is_none());
    }

    #[test]
    fn test_write_once() {
        let mut store = ArtifactStore::new();
        store.insert(corner(0), Artifact::Point(Vec3::ZERO)).unwrap();

        let err = store.insert(corner(0), Artifact::Point(Vec3::X)).unwrap_err();
        assert_eq!(err, ArtifactError::AlreadyWritten(corner(0)));
        assert_eq!(store.point(corner(0)).unwrap(), Vec3::ZERO);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_typed_lookup_errors() {
        let mut store = ArtifactStore::new();
        store.insert(corner(1), Artifact::Point(Vec3::X)).unwrap();

        assert_eq!(
            store.point(corner(2)),
            Err(ArtifactError::Missing(corner(2)))
        );
        assert!(matches!(
            store.face(corner(1)),
            Err(ArtifactError::WrongKind {
                expected: ArtifactKind::Face,
                found: ArtifactKind::Point,
                ..
            })
        ));
        assert!(store.shape(corner(1)).is_err());
    }

    #[test]
    fn test_insertion_order_and_counts() {
        let mut store = ArtifactStore::new();
        let face = FaceHandle::new(uuid::Uuid::from_u128(1));
        store
            .insert(ArtifactName::Face(FaceSide::Top), Artifact::Face(face))
            .unwrap();
        store.insert(corner(3), Artifact::Point(Vec3::Y)).unwrap();

        let names: Vec<_> = store.iter().map(|(name, _)| name.to_string()).collect();
        assert_eq!(names, vec!["face_top", "p3"]);
        assert_eq!(store.count(ArtifactKind::Face), 1);
        assert_eq!(store.count(ArtifactKind::Point), 1);
        assert_eq!(
            store.name_of_shape(&ShapeHandle::Face(face)),
            Some(ArtifactName::Face(FaceSide::Top))
        );
        let other = ShapeHandle::Face(FaceHandle::new(uuid::Uuid::from_u128(2)));
        assert_eq!(store.name_of_shape(&other), None);
    }

    #[test]
    fn test_side_corners_share_edges_with_caps() {
        for side in FaceSide::SIDES {
            let c = side.corners();
            // Every side face runs along one bottom edge and one top edge
            assert!(c.iter().filter(|k| k.index() < 4).count() == 2);
            assert!(c.iter().filter(|k| k.index() >= 4).count() == 2);
        }
    }
}
