//! Displayed shape management.

use std::collections::HashMap;

use glam::Vec3;
use uuid::Uuid;

use brep_kernel::{EdgeInfo, TessellatedMesh};

use crate::bounds::BoundingBox;
use crate::constants::shading;
use crate::picking::ray_triangles_intersection;
use crate::sub_renderers::{EdgeData, MeshData};

/// Colors used to draw one shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    /// Face color (RGBA).
    pub face_color: [f32; 4],
    /// Edge color (RGB).
    pub edge_color: [f32; 3],
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            face_color: [0.7, 0.7, 0.7, 1.0],
            edge_color: shading::EDGE_COLOR,
        }
    }
}

/// GPU buffers and bounds for one displayed shape.
pub struct ShapeEntry {
    /// Shaded faces, absent for shapes without triangles.
    pub mesh: Option<MeshData>,
    /// Boundary edges.
    pub edges: Option<EdgeData>,
    /// World-space bounds of faces and edges.
    pub bounds: BoundingBox,
    /// CPU copy of the triangles for picking.
    pub triangles: Vec<[Vec3; 3]>,
}

/// Manages displayed shapes keyed by kernel shape id.
#[derive(Default)]
pub struct ShapeManager {
    shapes: HashMap<Uuid, ShapeEntry>,
}

impl ShapeManager {
    /// Create an empty shape manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload a shape, replacing any previous entry with the same id.
    pub fn add(
        &mut self,
        device: &wgpu::Device,
        id: Uuid,
        mesh: &TessellatedMesh,
        edges: &[EdgeInfo],
        style: ShapeStyle,
    ) {
        let entry = ShapeEntry {
            mesh: MeshData::from_tessellated(device, mesh, style.face_color),
            edges: EdgeData::from_edges(device, edges, style.edge_color),
            bounds: shape_bounds(mesh, edges),
            triangles: mesh.triangles().collect(),
        };
        if self.shapes.insert(id, entry).is_some() {
            tracing::debug!("Replaced displayed shape {}", id);
        }
    }

    /// Remove all shapes.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Number of displayed shapes.
    pub fn count(&self) -> usize {
        self.shapes.len()
    }

    /// Iterate displayed shapes.
    pub fn iter(&self) -> impl Iterator<Item = &ShapeEntry> {
        self.shapes.values()
    }

    /// Nearest shape hit by a ray, with the ray parameter of the hit.
    pub fn pick(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<(Uuid, f32)> {
        self.shapes
            .iter()
            .filter_map(|(id, entry)| {
                ray_triangles_intersection(ray_origin, ray_dir, &entry.triangles).map(|t| (*id, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Union of all displayed shape bounds.
    pub fn bounds(&self) -> BoundingBox {
        self.shapes
            .values()
            .fold(BoundingBox::empty(), |acc, entry| acc.union(&entry.bounds))
    }
}

/// Bounds covering a shape's triangle vertices and edge endpoints.
pub fn shape_bounds(mesh: &TessellatedMesh, edges: &[EdgeInfo]) -> BoundingBox {
    let mesh_points = mesh.vertices.iter().map(|v| Vec3::from(*v));
    let edge_points = edges.iter().flat_map(|e| [e.start, e.end]);
    BoundingBox::from_points(mesh_points.chain(edge_points))
}
