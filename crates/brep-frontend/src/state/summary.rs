//! Artifact list entries for the artifacts panel

use brep_core::{Artifact, ArtifactKind, ArtifactStore};
use brep_kernel::BrepKernel;

/// One row of the artifacts panel
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactSummary {
    /// Artifact key (p0, face_bottom, shell, ...)
    pub name: String,
    pub kind: ArtifactKind,
    /// Coordinates or topology counts
    pub detail: String,
}

/// Describe every stored artifact in construction order.
///
/// Topology queries that fail are reported in the detail column.
pub fn summarize_artifacts(store: &ArtifactStore, kernel: &dyn BrepKernel) -> Vec<ArtifactSummary> {
    store
        .iter()
        .map(|(name, artifact)| {
            let detail = match artifact {
                Artifact::Point(p) => format!("({}, {}, {})", p.x, p.y, p.z),
                Artifact::Face(face) => match kernel.face_topology(face) {
                    Ok(topo) => format!(
                        "{} edges, {}",
                        topo.edge_count,
                        if topo.closed { "closed" } else { "open" }
                    ),
                    Err(e) => e.to_string(),
                },
                Artifact::Shell(shell) => match kernel.shell_topology(shell) {
                    Ok(topo) => format!(
                        "{} faces, {} edges, {} vertices, {}",
                        topo.face_count,
                        topo.edge_count,
                        topo.vertex_count,
                        if topo.closed { "closed" } else { "open" }
                    ),
                    Err(e) => e.to_string(),
                },
                Artifact::Solid(solid) => match kernel.solid_topology(solid) {
                    Ok(topo) => format!("{} shell, {} faces", topo.shell_count, topo.face_count),
                    Err(e) => e.to_string(),
                },
            };
            ArtifactSummary {
                name: name.to_string(),
                kind: artifact.kind(),
                detail,
            }
        })
        .collect()
}
