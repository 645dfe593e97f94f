//! Truck B-rep Kernel Backend
//!
//! Pure Rust B-Rep kernel using the Truck library.
//!
//! Faces are planar polygons bounded by line edges. Sewing rebuilds the faces
//! on a shared vertex and edge pool so that adjacent faces reference the same
//! topological edge.

use glam::{DVec3, Vec3};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use truck_meshalgo::prelude::*;
use truck_modeling::{Edge, Face, Point3, Shell, Solid as TruckSolid, Vertex, Wire, builder};
use truck_topology::shell::ShellCondition;

use super::{
    BrepKernel, EdgeInfo, FaceHandle, FaceTopology, KernelError, KernelResult, ShapeHandle,
    ShapeKind, ShellHandle, ShellTopology, SolidHandle, SolidTopology, TessellatedMesh,
};
use crate::polygon;
use crate::properties::MassProperties;
use crate::sewing::{self, PolygonFace};

/// Relative tolerance for degenerate edges and non-planar profiles
const GEOMETRY_EPSILON: f64 = 1.0e-9;

/// Chord tolerance for triangulation, relative to the face extent
const TESSELLATION_TOLERANCE: f64 = 1.0e-3;

/// A shape stored inside the kernel
#[derive(Clone)]
enum StoredShape {
    Face(Face),
    Shell(Shell),
    Solid(TruckSolid),
}

/// Truck-based B-rep kernel
pub struct TruckKernel {
    /// Storage for shape data (keyed by UUID)
    shapes: Mutex<HashMap<Uuid, StoredShape>>,
}

impl TruckKernel {
    /// Create a new Truck kernel
    pub fn new() -> Self {
        Self {
            shapes: Mutex::new(HashMap::new()),
        }
    }

    fn shapes(&self) -> MutexGuard<'_, HashMap<Uuid, StoredShape>> {
        self.shapes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a shape and return its key
    fn store(&self, shape: StoredShape) -> Uuid {
        let id = Uuid::new_v4();
        self.shapes().insert(id, shape);
        id
    }

    fn get_face(&self, handle: &FaceHandle) -> KernelResult<Face> {
        match self.shapes().get(&handle.id) {
            Some(StoredShape::Face(face)) => Ok(face.clone()),
            _ => Err(KernelError::ShapeNotFound {
                kind: ShapeKind::Face,
                id: handle.id,
            }),
        }
    }

    fn get_shell(&self, handle: &ShellHandle) -> KernelResult<Shell> {
        match self.shapes().get(&handle.id) {
            Some(StoredShape::Shell(shell)) => Ok(shell.clone()),
            _ => Err(KernelError::ShapeNotFound {
                kind: ShapeKind::Shell,
                id: handle.id,
            }),
        }
    }

    fn get_solid(&self, handle: &SolidHandle) -> KernelResult<TruckSolid> {
        match self.shapes().get(&handle.id) {
            Some(StoredShape::Solid(solid)) => Ok(solid.clone()),
            _ => Err(KernelError::ShapeNotFound {
                kind: ShapeKind::Solid,
                id: handle.id,
            }),
        }
    }

    /// All faces of any shape kind
    fn collect_faces(&self, shape: &ShapeHandle) -> KernelResult<Vec<Face>> {
        Ok(match shape {
            ShapeHandle::Face(h) => vec![self.get_face(h)?],
            ShapeHandle::Shell(h) => self.get_shell(h)?.face_iter().cloned().collect(),
            ShapeHandle::Solid(h) => self
                .get_solid(h)?
                .boundaries()
                .iter()
                .flat_map(|shell| shell.face_iter().cloned())
                .collect(),
        })
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

fn to_point(p: Vec3) -> Point3 {
    Point3::new(p.x as f64, p.y as f64, p.z as f64)
}

fn to_dvec(p: Point3) -> DVec3 {
    DVec3::new(p.x, p.y, p.z)
}

/// Oriented boundary loops of a face, as the start point of each edge
fn face_loops(face: &Face) -> Vec<Vec<DVec3>> {
    face.boundaries()
        .iter()
        .map(|wire| {
            wire.edge_iter()
                .map(|edge| to_dvec(edge.front().point()))
                .collect()
        })
        .collect()
}

/// Flat-shaded triangles for one face
///
/// Triangulation goes through truck-meshalgo, so concave boundaries are
/// covered exactly. The tolerance scales with the face size.
fn tessellate_face(face: &Face) -> KernelResult<TessellatedMesh> {
    let loops = face_loops(face);
    let Some(outer) = loops.first() else {
        return Err(KernelError::TessellationFailed("face has no boundary".into()));
    };
    let normal = polygon::newell_normal(outer)
        .try_normalize()
        .ok_or_else(|| KernelError::TessellationFailed("face boundary is degenerate".into()))?;

    let tolerance = polygon::extent(outer).max(1.0) * TESSELLATION_TOLERANCE;
    let poly = Shell::from(vec![face.clone()])
        .robust_triangulation(tolerance)
        .to_polygon();

    let positions: Vec<DVec3> = poly.positions().iter().map(|p| to_dvec(*p)).collect();
    let mut mesh = TessellatedMesh::new();
    mesh.vertices = positions.iter().map(|p| p.as_vec3().to_array()).collect();
    mesh.normals = vec![normal.as_vec3().to_array(); positions.len()];

    for tri in poly.tri_faces() {
        let [a, b, c] = [tri[0].pos, tri[1].pos, tri[2].pos];
        // Wind every triangle with the face normal
        let winding = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        let indices = if winding.dot(normal) < 0.0 { [a, c, b] } else { [a, b, c] };
        mesh.indices.extend(indices.map(|i| i as u32));
    }

    if mesh.indices.is_empty() {
        return Err(KernelError::TessellationFailed(
            "triangulation produced no triangles".into(),
        ));
    }
    Ok(mesh)
}

/// Build truck faces from a sewn polygon shell, sharing vertices and edges
fn build_shell(sewn: &sewing::SewnShell) -> KernelResult<Shell> {
    let vertices: Vec<Vertex> = sewn
        .positions
        .iter()
        .map(|p| builder::vertex(Point3::new(p.x, p.y, p.z)))
        .collect();

    // Stored edges run from the lower to the higher vertex index
    let mut edges: HashMap<(usize, usize), Edge> = HashMap::new();
    let mut faces = Vec::with_capacity(sewn.faces.len());

    for rings in &sewn.faces {
        let wires: Vec<Wire> = rings
            .iter()
            .map(|ring| {
                let n = ring.len();
                let ring_edges: Vec<Edge> = (0..n)
                    .map(|k| {
                        let (a, b) = (ring[k], ring[(k + 1) % n]);
                        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
                        let edge = edges
                            .entry((lo, hi))
                            .or_insert_with(|| builder::line(&vertices[lo], &vertices[hi]));
                        if a < b { edge.clone() } else { edge.inverse() }
                    })
                    .collect();
                Wire::from(ring_edges)
            })
            .collect();

        let face = builder::try_attach_plane(&wires)
            .map_err(|e| KernelError::SewingFailed(format!("Failed to rebuild face: {:?}", e)))?;
        faces.push(face);
    }

    Ok(Shell::from(faces))
}

impl BrepKernel for TruckKernel {
    fn name(&self) -> &str {
        "truck"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn make_face(&self, points: &[Vec3]) -> KernelResult<FaceHandle> {
        if points.len() < 3 {
            return Err(KernelError::InvalidProfile(
                "Face boundary must have at least 3 points".into(),
            ));
        }

        let corners: Vec<DVec3> = points.iter().map(|p| p.as_dvec3()).collect();
        let eps = GEOMETRY_EPSILON * polygon::extent(&corners).max(1.0);
        let n = corners.len();
        if (0..n).any(|i| corners[i].distance(corners[(i + 1) % n]) <= eps) {
            return Err(KernelError::OperationFailed(
                "Face boundary has a zero-length edge".into(),
            ));
        }
        match polygon::planarity_deviation(&corners) {
            None => {
                return Err(KernelError::OperationFailed(
                    "Face boundary points are collinear".into(),
                ));
            }
            Some(deviation) if deviation > eps * 1.0e3 => {
                return Err(KernelError::OperationFailed(format!(
                    "Face boundary is not planar (deviation {deviation:.3e})"
                )));
            }
            Some(_) => {}
        }

        // Create vertices
        let vertices: Vec<Vertex> = points.iter().map(|p| builder::vertex(to_point(*p))).collect();

        // Create edges between consecutive vertices
        let edges: Vec<Edge> = (0..n)
            .map(|i| builder::line(&vertices[i], &vertices[(i + 1) % n]))
            .collect();
        let wire: Wire = edges.into();

        // Create a face from the wire
        let face = builder::try_attach_plane(&[wire])
            .map_err(|e| KernelError::OperationFailed(format!("Failed to create face: {:?}", e)))?;

        let id = self.store(StoredShape::Face(face));
        tracing::debug!("Created face {} with {} edges", id, n);
        Ok(FaceHandle::new(id))
    }

    fn sew(&self, faces: &[FaceHandle], tolerance: f32) -> KernelResult<ShellHandle> {
        let mut seen = HashSet::new();
        if let Some(dup) = faces.iter().find(|h| !seen.insert(h.id)) {
            return Err(KernelError::SewingFailed(format!(
                "face {} passed more than once",
                dup.id
            )));
        }

        let polygons: Vec<PolygonFace> = faces
            .iter()
            .map(|h| self.get_face(h).map(|face| face_loops(&face)))
            .collect::<KernelResult<_>>()?;

        let sewn = sewing::sew_polygons(&polygons, tolerance as f64)?;
        let shell = build_shell(&sewn)?;

        let closed = matches!(shell.shell_condition(), ShellCondition::Closed);
        if sewn.closed && !closed {
            tracing::warn!("Sewn shell has matching edges but truck reports it open");
        }

        let id = self.store(StoredShape::Shell(shell));
        tracing::debug!(
            "Sewed {} faces into shell {} ({} vertices, closed: {})",
            faces.len(),
            id,
            sewn.positions.len(),
            closed
        );
        Ok(ShellHandle::new(id))
    }

    fn make_solid(&self, shell: &ShellHandle) -> KernelResult<SolidHandle> {
        let shell = self.get_shell(shell)?;

        let condition = shell.shell_condition();
        if !matches!(condition, ShellCondition::Closed) {
            return Err(KernelError::OpenShell(format!(
                "shell condition is {:?}",
                condition
            )));
        }

        let solid = TruckSolid::try_new(vec![shell])
            .map_err(|e| KernelError::OperationFailed(format!("Failed to create solid: {:?}", e)))?;

        let id = self.store(StoredShape::Solid(solid));
        tracing::debug!("Created solid {}", id);
        Ok(SolidHandle::new(id))
    }

    fn face_topology(&self, face: &FaceHandle) -> KernelResult<FaceTopology> {
        let face = self.get_face(face)?;
        let wires = face.boundaries();
        Ok(FaceTopology {
            wire_count: wires.len(),
            edge_count: wires.iter().map(|wire| wire.edge_iter().count()).sum(),
            closed: wires.iter().all(|wire| wire.is_closed()),
        })
    }

    fn shell_topology(&self, shell: &ShellHandle) -> KernelResult<ShellTopology> {
        let shell = self.get_shell(shell)?;

        let mut edge_ids = HashSet::new();
        let mut vertex_ids = HashSet::new();
        for face in shell.face_iter() {
            for wire in face.boundaries() {
                for edge in wire.edge_iter() {
                    edge_ids.insert(edge.id());
                    vertex_ids.insert(edge.front().id());
                    vertex_ids.insert(edge.back().id());
                }
            }
        }

        Ok(ShellTopology {
            face_count: shell.face_iter().count(),
            edge_count: edge_ids.len(),
            vertex_count: vertex_ids.len(),
            closed: matches!(shell.shell_condition(), ShellCondition::Closed),
        })
    }

    fn solid_topology(&self, solid: &SolidHandle) -> KernelResult<SolidTopology> {
        let solid = self.get_solid(solid)?;
        let shells = solid.boundaries();
        Ok(SolidTopology {
            shell_count: shells.len(),
            face_count: shells.iter().map(|shell| shell.face_iter().count()).sum(),
        })
    }

    fn tessellate(&self, shape: &ShapeHandle) -> KernelResult<TessellatedMesh> {
        let mut mesh = TessellatedMesh::new();
        for face in self.collect_faces(shape)? {
            mesh.append(&tessellate_face(&face)?);
        }
        Ok(mesh)
    }

    fn edges(&self, shape: &ShapeHandle) -> KernelResult<Vec<EdgeInfo>> {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for face in self.collect_faces(shape)? {
            for wire in face.boundaries() {
                for edge in wire.edge_iter() {
                    if seen.insert(edge.id()) {
                        let start = to_dvec(edge.front().point()).as_vec3();
                        let end = to_dvec(edge.back().point()).as_vec3();
                        edges.push(EdgeInfo::new(start, end));
                    }
                }
            }
        }
        Ok(edges)
    }

    fn mass_properties(&self, solid: &SolidHandle) -> KernelResult<MassProperties> {
        let mesh = self.tessellate(&ShapeHandle::Solid(*solid))?;
        Ok(MassProperties::from_mesh(&mesh))
    }

    fn release(&self, shape: &ShapeHandle) {
        if self.shapes().remove(&shape.id()).is_some() {
            tracing::trace!("Released {} {}", shape.kind(), shape.id());
        }
    }

    fn clear(&self) {
        self.shapes().clear();
    }

    fn shape_count(&self) -> usize {
        self.shapes().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn corners(d: Vec3) -> [Vec3; 8] {
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(d.x, 0.0, 0.0),
            Vec3::new(d.x, d.y, 0.0),
            Vec3::new(0.0, d.y, 0.0),
            Vec3::new(0.0, 0.0, d.z),
            Vec3::new(d.x, 0.0, d.z),
            Vec3::new(d.x, d.y, d.z),
            Vec3::new(0.0, d.y, d.z),
        ]
    }

    fn box_faces(kernel: &TruckKernel, d: Vec3) -> Vec<FaceHandle> {
        let p = corners(d);
        [
            [1, 2, 6, 5],
            [0, 1, 5, 4],
            [2, 3, 7, 6],
            [3, 0, 4, 7],
            [0, 1, 2, 3],
            [4, 5, 6, 7],
        ]
        .iter()
        .map(|idx| kernel.make_face(&idx.map(|i| p[i])).unwrap())
        .collect()
    }

    #[test]
    fn test_make_face_topology() {
        let kernel = TruckKernel::new();
        let p = corners(Vec3::new(100.0, 60.0, 30.0));
        let face = kernel.make_face(&[p[0], p[1], p[2], p[3]]).unwrap();

        let topo = kernel.face_topology(&face).unwrap();
        assert_eq!(topo.edge_count, 4);
        assert_eq!(topo.wire_count, 1);
        assert!(topo.closed);

        let mesh = kernel.tessellate(&face.into()).unwrap();
        assert!(mesh.triangle_count() >= 2);
        let area: f32 = mesh
            .triangles()
            .map(|[a, b, c]| (b - a).cross(c - a).length() * 0.5)
            .sum();
        assert_relative_eq!(area, 6000.0, epsilon = 1e-2);
        assert_eq!(kernel.edges(&face.into()).unwrap().len(), 4);
    }

    #[test]
    fn test_concave_face_tessellation() {
        let kernel = TruckKernel::new();
        let ell: Vec<Vec3> = [(2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0), (0.0, 0.0), (2.0, 0.0)]
            .iter()
            .map(|&(x, y)| Vec3::new(x, y, 0.0))
            .collect();
        let face = kernel.make_face(&ell).unwrap();
        let mesh = kernel.tessellate(&face.into()).unwrap();

        let mut area = 0.0;
        for [a, b, c] in mesh.triangles() {
            let n = (b - a).cross(c - a);
            // No triangle is wound against the face
            assert!(n.z > -1e-6, "triangle {a:?} {b:?} {c:?} is flipped");
            area += n.length() * 0.5;
            // Nothing spills into the notch of the L
            let centroid = (a + b + c) / 3.0;
            assert!(!(centroid.x > 1.0 && centroid.y > 1.0));
        }
        assert_relative_eq!(area, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_make_face_rejects_bad_profiles() {
        let kernel = TruckKernel::new();
        assert!(matches!(
            kernel.make_face(&[Vec3::ZERO, Vec3::X]),
            Err(KernelError::InvalidProfile(_))
        ));
        assert!(matches!(
            kernel.make_face(&[Vec3::ZERO, Vec3::X, Vec3::X * 2.0]),
            Err(KernelError::OperationFailed(_))
        ));
        assert!(matches!(
            kernel.make_face(&[Vec3::ZERO, Vec3::X, Vec3::X, Vec3::Y]),
            Err(KernelError::OperationFailed(_))
        ));
        assert!(matches!(
            kernel.make_face(&[Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 1.0), Vec3::Y]),
            Err(KernelError::OperationFailed(_))
        ));
        assert_eq!(kernel.shape_count(), 0);
    }

    #[test]
    fn test_sew_box_into_closed_shell() {
        let kernel = TruckKernel::new();
        let faces = box_faces(&kernel, Vec3::new(100.0, 60.0, 30.0));
        let shell = kernel.sew(&faces, 1e-6).unwrap();

        let topo = kernel.shell_topology(&shell).unwrap();
        assert_eq!(topo.face_count, 6);
        assert_eq!(topo.edge_count, 12);
        assert_eq!(topo.vertex_count, 8);
        assert!(topo.closed);
        assert_eq!(kernel.edges(&shell.into()).unwrap().len(), 12);
    }

    #[test]
    fn test_sew_rejects_duplicates_and_unknown_faces() {
        let kernel = TruckKernel::new();
        let faces = box_faces(&kernel, Vec3::ONE);

        let mut doubled = faces.clone();
        doubled.push(faces[0]);
        assert!(matches!(
            kernel.sew(&doubled, 1e-6),
            Err(KernelError::SewingFailed(_))
        ));

        let unknown = FaceHandle::new(Uuid::new_v4());
        assert!(matches!(
            kernel.sew(&[faces[0], unknown], 1e-6),
            Err(KernelError::ShapeNotFound { .. })
        ));
    }

    #[test]
    fn test_open_shell_cannot_become_solid() {
        let kernel = TruckKernel::new();
        let faces = box_faces(&kernel, Vec3::ONE);
        let shell = kernel.sew(&faces[..5], 1e-6).unwrap();

        assert!(!kernel.shell_topology(&shell).unwrap().closed);
        assert!(matches!(
            kernel.make_solid(&shell),
            Err(KernelError::OpenShell(_))
        ));
    }

    #[test]
    fn test_solid_mass_properties() {
        let kernel = TruckKernel::new();
        let d = Vec3::new(100.0, 60.0, 30.0);
        let faces = box_faces(&kernel, d);
        let shell = kernel.sew(&faces, 1e-6).unwrap();
        let solid = kernel.make_solid(&shell).unwrap();

        let topo = kernel.solid_topology(&solid).unwrap();
        assert_eq!(topo.shell_count, 1);
        assert_eq!(topo.face_count, 6);

        let props = kernel.mass_properties(&solid).unwrap();
        assert_relative_eq!(props.volume, 180_000.0, epsilon = 1e-6);
        assert_relative_eq!(props.surface_area, 21_600.0, epsilon = 1e-6);
        assert_relative_eq!(props.center_of_mass.x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(props.center_of_mass.y, 30.0, epsilon = 1e-9);
        assert_relative_eq!(props.center_of_mass.z, 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_release_and_clear() {
        let kernel = TruckKernel::new();
        let faces = box_faces(&kernel, Vec3::ONE);
        assert_eq!(kernel.shape_count(), 6);

        kernel.release(&faces[0].into());
        assert_eq!(kernel.shape_count(), 5);
        assert!(kernel.face_topology(&faces[0]).is_err());

        kernel.clear();
        assert_eq!(kernel.shape_count(), 0);
    }
}
