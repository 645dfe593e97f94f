//! B-rep kernel trait definitions
//!
//! These traits define the interface that all geometry backends must implement.
//! Shapes never leave the kernel: callers hold `Uuid`-keyed handles and ask the
//! kernel for queries, tessellations and derived shapes.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::properties::MassProperties;

/// Default tolerance used when merging coincident vertices during sewing
pub const DEFAULT_SEWING_TOLERANCE: f32 = 1.0e-6;

/// Handle to a planar face owned by the kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceHandle {
    /// Storage key inside the kernel
    pub id: Uuid,
}

/// Handle to a sewn shell owned by the kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShellHandle {
    /// Storage key inside the kernel
    pub id: Uuid,
}

/// Handle to a solid owned by the kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolidHandle {
    /// Storage key inside the kernel
    pub id: Uuid,
}

impl FaceHandle {
    /// Wrap an existing storage key
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl ShellHandle {
    /// Wrap an existing storage key
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl SolidHandle {
    /// Wrap an existing storage key
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

/// Kind of a stored shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Face,
    Shell,
    Solid,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Face => "face",
            ShapeKind::Shell => "shell",
            ShapeKind::Solid => "solid",
        };
        f.write_str(name)
    }
}

/// Any displayable shape handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeHandle {
    Face(FaceHandle),
    Shell(ShellHandle),
    Solid(SolidHandle),
}

impl ShapeHandle {
    /// Storage key of the underlying shape
    pub fn id(&self) -> Uuid {
        match self {
            ShapeHandle::Face(h) => h.id,
            ShapeHandle::Shell(h) => h.id,
            ShapeHandle::Solid(h) => h.id,
        }
    }

    /// Kind of the underlying shape
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeHandle::Face(_) => ShapeKind::Face,
            ShapeHandle::Shell(_) => ShapeKind::Shell,
            ShapeHandle::Solid(_) => ShapeKind::Solid,
        }
    }
}

impl From<FaceHandle> for ShapeHandle {
    fn from(handle: FaceHandle) -> Self {
        ShapeHandle::Face(handle)
    }
}

impl From<ShellHandle> for ShapeHandle {
    fn from(handle: ShellHandle) -> Self {
        ShapeHandle::Shell(handle)
    }
}

impl From<SolidHandle> for ShapeHandle {
    fn from(handle: SolidHandle) -> Self {
        ShapeHandle::Solid(handle)
    }
}

/// Geometric information about a single edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeInfo {
    /// Start point of the edge
    pub start: Vec3,
    /// End point of the edge
    pub end: Vec3,
    /// Midpoint of the edge
    pub midpoint: Vec3,
    /// Length of the edge
    pub length: f32,
}

impl EdgeInfo {
    /// Create a new edge info
    pub fn new(start: Vec3, end: Vec3) -> Self {
        let midpoint = (start + end) * 0.5;
        let length = (end - start).length();
        Self {
            start,
            end,
            midpoint,
            length,
        }
    }
}

/// Boundary summary of a face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceTopology {
    /// Number of boundary wires (1 for a face without holes)
    pub wire_count: usize,
    /// Total number of boundary edges over all wires
    pub edge_count: usize,
    /// Every boundary wire starts where it ends
    pub closed: bool,
}

/// Connectivity summary of a shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellTopology {
    /// Number of faces in the shell
    pub face_count: usize,
    /// Number of distinct edges (shared edges count once)
    pub edge_count: usize,
    /// Number of distinct vertices
    pub vertex_count: usize,
    /// Shell is oriented and every edge is shared by exactly two faces
    pub closed: bool,
}

/// Connectivity summary of a solid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolidTopology {
    /// Number of boundary shells
    pub shell_count: usize,
    /// Number of faces over all boundary shells
    pub face_count: usize,
}

/// Error type for kernel operations
#[derive(Debug, Clone, Error)]
pub enum KernelError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("Sewing failed: {0}")]
    SewingFailed(String),

    #[error("Shell is not closed: {0}")]
    OpenShell(String),

    #[error("Shape not found: {kind} {id}")]
    ShapeNotFound { kind: ShapeKind, id: Uuid },

    #[error("Tessellation failed: {0}")]
    TessellationFailed(String),

    #[error("Kernel not available: {0}")]
    KernelNotAvailable(String),

    #[error("File I/O error: {0}")]
    FileIo(String),

    #[error("STL export failed: {0}")]
    StlExport(String),
}

/// Result type for kernel operations
pub type KernelResult<T> = Result<T, KernelError>;

/// A tessellated mesh output from the kernel
#[derive(Debug, Clone, Default)]
pub struct TessellatedMesh {
    /// Vertex positions (3 floats per vertex)
    pub vertices: Vec<[f32; 3]>,
    /// Vertex normals (3 floats per vertex)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (3 indices per triangle)
    pub indices: Vec<u32>,
}

impl TessellatedMesh {
    /// Create an empty tessellated mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as position triples
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                Vec3::from(self.vertices[tri[0] as usize]),
                Vec3::from(self.vertices[tri[1] as usize]),
                Vec3::from(self.vertices[tri[2] as usize]),
            ]
        })
    }

    /// Axis-aligned bounds as (min, max), `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.vertices.iter().map(|v| Vec3::from(*v));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// Append another mesh, offsetting its indices
    pub fn append(&mut self, other: &TessellatedMesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|i| i + offset));
    }
}

/// The main B-rep kernel trait
///
/// Implementations provide the actual topology construction using different
/// backends. Every shape is stored kernel-side and addressed through handles.
pub trait BrepKernel: Send + Sync {
    /// Get the name of this kernel
    fn name(&self) -> &str;

    /// Check if the kernel is available
    fn is_available(&self) -> bool;

    /// Build a planar face bounded by straight edges through `points`
    ///
    /// Edges run `points[0] -> points[1] -> ... -> points[0]`, forming a
    /// single closed wire.
    fn make_face(&self, points: &[Vec3]) -> KernelResult<FaceHandle>;

    /// Sew faces into a shell, merging coincident vertices and edges
    ///
    /// # Arguments
    /// * `faces` - Faces to sew, each passed exactly once
    /// * `tolerance` - Distance under which two vertices are merged
    fn sew(&self, faces: &[FaceHandle], tolerance: f32) -> KernelResult<ShellHandle>;

    /// Turn a closed shell into a solid
    fn make_solid(&self, shell: &ShellHandle) -> KernelResult<SolidHandle>;

    /// Boundary summary of a face
    fn face_topology(&self, face: &FaceHandle) -> KernelResult<FaceTopology>;

    /// Connectivity summary of a shell
    fn shell_topology(&self, shell: &ShellHandle) -> KernelResult<ShellTopology>;

    /// Connectivity summary of a solid
    fn solid_topology(&self, solid: &SolidHandle) -> KernelResult<SolidTopology>;

    /// Tessellate a shape into triangles
    fn tessellate(&self, shape: &ShapeHandle) -> KernelResult<TessellatedMesh>;

    /// Get the distinct edges of a shape
    fn edges(&self, shape: &ShapeHandle) -> KernelResult<Vec<EdgeInfo>>;

    /// Volume, surface area and center of mass of a solid
    fn mass_properties(&self, solid: &SolidHandle) -> KernelResult<MassProperties>;

    /// Drop a stored shape
    fn release(&self, shape: &ShapeHandle);

    /// Drop every stored shape
    fn clear(&self);

    /// Number of shapes currently stored
    fn shape_count(&self) -> usize;
}

/// A null kernel that always returns errors (used when no kernel is available)
#[derive(Debug, Default)]
pub struct NullKernel;

fn not_available<T>() -> KernelResult<T> {
    Err(KernelError::KernelNotAvailable(
        "No B-rep kernel available".into(),
    ))
}

impl BrepKernel for NullKernel {
    fn name(&self) -> &str {
        "null"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn make_face(&self, _points: &[Vec3]) -> KernelResult<FaceHandle> {
        not_available()
    }

    fn sew(&self, _faces: &[FaceHandle], _tolerance: f32) -> KernelResult<ShellHandle> {
        not_available()
    }

    fn make_solid(&self, _shell: &ShellHandle) -> KernelResult<SolidHandle> {
        not_available()
    }

    fn face_topology(&self, _face: &FaceHandle) -> KernelResult<FaceTopology> {
        not_available()
    }

    fn shell_topology(&self, _shell: &ShellHandle) -> KernelResult<ShellTopology> {
        not_available()
    }

    fn solid_topology(&self, _solid: &SolidHandle) -> KernelResult<SolidTopology> {
        not_available()
    }

    fn tessellate(&self, _shape: &ShapeHandle) -> KernelResult<TessellatedMesh> {
        not_available()
    }

    fn edges(&self, _shape: &ShapeHandle) -> KernelResult<Vec<EdgeInfo>> {
        not_available()
    }

    fn mass_properties(&self, _solid: &SolidHandle) -> KernelResult<MassProperties> {
        not_available()
    }

    fn release(&self, _shape: &ShapeHandle) {}

    fn clear(&self) {}

    fn shape_count(&self) -> usize {
        0
    }
}

/// Get the default kernel based on available features
pub fn default_kernel() -> Box<dyn BrepKernel> {
    #[cfg(feature = "truck")]
    {
        Box::new(super::TruckKernel::new())
    }

    #[cfg(not(feature = "truck"))]
    {
        Box::new(NullKernel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_kernel_rejects_everything() {
        let kernel = NullKernel;
        assert!(!kernel.is_available());
        let err = kernel
            .make_face(&[Vec3::ZERO, Vec3::X, Vec3::Y])
            .unwrap_err();
        assert!(matches!(err, KernelError::KernelNotAvailable(_)));
        assert_eq!(kernel.shape_count(), 0);
    }

    #[test]
    fn test_shape_handle_kind() {
        let id = Uuid::new_v4();
        let shape: ShapeHandle = ShellHandle::new(id).into();
        assert_eq!(shape.kind(), ShapeKind::Shell);
        assert_eq!(shape.id(), id);
        assert_eq!(ShapeKind::Solid.to_string(), "solid");
    }

    #[test]
    fn test_mesh_append_and_bounds() {
        let mut a = TessellatedMesh {
            vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            indices: vec![0, 1, 2],
        };
        let b = TessellatedMesh {
            vertices: vec![[0.0, 0.0, 2.0], [1.0, 0.0, 2.0], [0.0, 1.0, 2.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            indices: vec![0, 1, 2],
        };
        a.append(&b);
        assert_eq!(a.triangle_count(), 2);
        assert_eq!(a.indices[3..], [3, 4, 5]);
        let (min, max) = a.bounds().unwrap();
        assert_eq!(min, Vec3::ZERO);
        assert_eq!(max, Vec3::new(1.0, 1.0, 2.0));
        assert!(TessellatedMesh::new().bounds().is_none());
    }
}
