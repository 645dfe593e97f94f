//! Topological sewing of polygonal faces
//!
//! Works on plain point loops so it can be shared by any backend: vertices
//! within tolerance are merged into a pool, edges are keyed by their pooled
//! endpoints, and face orientation is propagated across shared edges so that
//! every interior edge is traversed once in each direction.

use std::collections::{HashMap, VecDeque};

use glam::DVec3;

use crate::kernel::{KernelError, KernelResult};
use crate::polygon;

/// A face given as its boundary loops (outer loop first)
pub type PolygonFace = Vec<Vec<DVec3>>;

/// Result of sewing: pooled vertices and faces referencing them by index
#[derive(Debug, Clone)]
pub struct SewnShell {
    /// Merged vertex positions
    pub positions: Vec<DVec3>,
    /// Per face, per loop, the pooled vertex indices in traversal order
    pub faces: Vec<Vec<Vec<usize>>>,
    /// Every edge is shared by exactly two faces
    pub closed: bool,
}

impl SewnShell {
    /// Number of distinct edges after merging
    pub fn edge_count(&self) -> usize {
        edge_uses(&self.faces).len()
    }

    /// Signed enclosed volume; positive when the faces point outward
    pub fn signed_volume(&self) -> f64 {
        self.faces
            .iter()
            .flatten()
            .map(|ring| {
                let points: Vec<DVec3> = ring.iter().map(|&i| self.positions[i]).collect();
                polygon::cone_volume(&points)
            })
            .sum()
    }
}

/// Canonical key of an undirected edge
fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

/// Every use of every edge as (face index, traversed from low to high index)
fn edge_uses(faces: &[Vec<Vec<usize>>]) -> HashMap<(usize, usize), Vec<(usize, bool)>> {
    let mut uses: HashMap<(usize, usize), Vec<(usize, bool)>> = HashMap::new();
    for (face_index, rings) in faces.iter().enumerate() {
        for ring in rings {
            let n = ring.len();
            for k in 0..n {
                let (a, b) = (ring[k], ring[(k + 1) % n]);
                uses.entry(edge_key(a, b))
                    .or_default()
                    .push((face_index, a < b));
            }
        }
    }
    uses
}

/// Merge `point` into the pool, returning its index
fn pool_index(pool: &mut Vec<DVec3>, point: DVec3, tolerance: f64) -> usize {
    let tol_sq = tolerance * tolerance;
    if let Some(index) = pool.iter().position(|p| p.distance_squared(point) <= tol_sq) {
        return index;
    }
    pool.push(point);
    pool.len() - 1
}

/// Sew polygon faces into a consistently oriented shell
pub fn sew_polygons(faces: &[PolygonFace], tolerance: f64) -> KernelResult<SewnShell> {
    if faces.is_empty() {
        return Err(KernelError::SewingFailed("no faces to sew".into()));
    }
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(KernelError::SewingFailed(format!(
            "invalid tolerance {tolerance}"
        )));
    }

    let mut positions = Vec::new();
    let mut indexed: Vec<Vec<Vec<usize>>> = Vec::with_capacity(faces.len());
    for (face_index, rings) in faces.iter().enumerate() {
        let mut face_rings = Vec::with_capacity(rings.len());
        for ring in rings {
            let ids: Vec<usize> = ring
                .iter()
                .map(|p| pool_index(&mut positions, *p, tolerance))
                .collect();
            let n = ids.len();
            if n < 3 || (0..n).any(|k| ids[k] == ids[(k + 1) % n]) {
                return Err(KernelError::SewingFailed(format!(
                    "face {face_index} collapses within tolerance {tolerance}"
                )));
            }
            face_rings.push(ids);
        }
        indexed.push(face_rings);
    }

    let uses = edge_uses(&indexed);
    if let Some((key, users)) = uses.iter().find(|(_, users)| users.len() > 2) {
        return Err(KernelError::SewingFailed(format!(
            "edge {key:?} is shared by {} faces",
            users.len()
        )));
    }

    // (neighbor, neighbor must flip relative to this face)
    let mut adjacency: Vec<Vec<(usize, bool)>> = vec![Vec::new(); indexed.len()];
    for users in uses.values() {
        if let [(f, df), (g, dg)] = users.as_slice() {
            if f != g {
                // Shared edges must be walked in opposite directions
                let relative = df == dg;
                adjacency[*f].push((*g, relative));
                adjacency[*g].push((*f, relative));
            }
        }
    }

    let mut flips: Vec<Option<bool>> = vec![None; indexed.len()];
    for seed in 0..indexed.len() {
        if flips[seed].is_some() {
            continue;
        }
        flips[seed] = Some(false);
        let mut queue = VecDeque::from([seed]);
        while let Some(face) = queue.pop_front() {
            let flip = flips[face].unwrap_or(false);
            for &(neighbor, relative) in &adjacency[face] {
                let wanted = flip ^ relative;
                match flips[neighbor] {
                    None => {
                        flips[neighbor] = Some(wanted);
                        queue.push_back(neighbor);
                    }
                    Some(existing) if existing != wanted => {
                        return Err(KernelError::SewingFailed(
                            "faces cannot be oriented consistently".into(),
                        ));
                    }
                    Some(_) => {}
                }
            }
        }
    }

    for (rings, flip) in indexed.iter_mut().zip(flips) {
        if flip == Some(true) {
            rings.iter_mut().for_each(|ring| ring.reverse());
        }
    }

    let closed = uses.values().all(|users| users.len() == 2);
    let mut shell = SewnShell {
        positions,
        faces: indexed,
        closed,
    };

    if closed && shell.signed_volume() < 0.0 {
        shell
            .faces
            .iter_mut()
            .flatten()
            .for_each(|ring| ring.reverse());
    }

    tracing::debug!(
        faces = shell.faces.len(),
        vertices = shell.positions.len(),
        closed = shell.closed,
        "Sewed polygon faces"
    );

    Ok(shell)
}
