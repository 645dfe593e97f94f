//! Mass properties of closed triangle meshes

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::kernel::TessellatedMesh;

/// Volume, surface area and center of mass of a closed body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassProperties {
    /// Enclosed volume (positive for outward-facing triangles)
    pub volume: f64,
    /// Total surface area
    pub surface_area: f64,
    /// Centroid of the enclosed volume, assuming uniform density
    pub center_of_mass: DVec3,
}

impl MassProperties {
    /// Integrate over a closed, consistently oriented triangle mesh
    ///
    /// Uses the divergence theorem: each triangle contributes the signed
    /// tetrahedron it forms with the origin. For a degenerate (zero volume)
    /// mesh the center falls back to the area-weighted surface centroid.
    pub fn from_mesh(mesh: &TessellatedMesh) -> Self {
        let mut volume = 0.0;
        let mut surface_area = 0.0;
        let mut volume_moment = DVec3::ZERO;
        let mut area_moment = DVec3::ZERO;

        for [a, b, c] in mesh.triangles() {
            let (v0, v1, v2) = (a.as_dvec3(), b.as_dvec3(), c.as_dvec3());

            let tet = v0.dot(v1.cross(v2)) / 6.0;
            volume += tet;
            volume_moment += tet * (v0 + v1 + v2) / 4.0;

            let area = (v1 - v0).cross(v2 - v0).length() * 0.5;
            surface_area += area;
            area_moment += area * (v0 + v1 + v2) / 3.0;
        }

        let center_of_mass = if volume.abs() > f64::EPSILON {
            volume_moment / volume
        } else if surface_area > 0.0 {
            area_moment / surface_area
        } else {
            DVec3::ZERO
        };

        Self {
            volume,
            surface_area,
            center_of_mass,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Closed, outward-facing tetrahedron with corners at the origin and unit axes
    fn unit_tetrahedron() -> TessellatedMesh {
        TessellatedMesh {
            vertices: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0],
            ],
            normals: vec![[0.0, 0.0, 0.0]; 4],
            indices: vec![0, 2, 1, 0, 1, 3, 0, 3, 2, 1, 2, 3],
        }
    }

    #[test]
    fn test_tetrahedron_properties() {
        let props = MassProperties::from_mesh(&unit_tetrahedron());
        assert_relative_eq!(props.volume, 1.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(props.center_of_mass.x, 0.25, epsilon = 1e-12);
        assert_relative_eq!(props.center_of_mass.y, 0.25, epsilon = 1e-12);
        assert_relative_eq!(props.center_of_mass.z, 0.25, epsilon = 1e-12);
        let slanted = 3f64.sqrt() / 2.0;
        assert_relative_eq!(props.surface_area, 1.5 + slanted, epsilon = 1e-6);
    }

    #[test]
    fn test_inverted_mesh_has_negative_volume() {
        let mut mesh = unit_tetrahedron();
        mesh.indices.chunks_exact_mut(3).for_each(|tri| tri.swap(1, 2));
        let props = MassProperties::from_mesh(&mesh);
        assert_relative_eq!(props.volume, -1.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(props.center_of_mass.z, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_mesh() {
        let props = MassProperties::from_mesh(&TessellatedMesh::new());
        assert_eq!(props.volume, 0.0);
        assert_eq!(props.surface_area, 0.0);
        assert_eq!(props.center_of_mass, DVec3::ZERO);
    }
}
