//! Built-in sub-renderers for the B-rep viewport.
//!
//! - [`GridRenderer`]: ground grid on the XY plane
//! - [`MeshRenderer`]: shaded faces
//! - [`EdgeRenderer`]: boundary edges drawn over faces

pub mod edges;
pub mod grid;
pub mod mesh;

pub use edges::{EdgeData, EdgeRenderer};
pub use grid::GridRenderer;
pub use mesh::{MeshData, MeshRenderer};
