//! B-rep Demo Renderer
//!
//! WGPU-based 3D viewport for faces, shells and solids produced by the
//! modeling kernel.
//!
//! # Module Structure
//!
//! ```text
//! brep-renderer/
//! ├── bounds.rs        # Axis-aligned bounds for camera framing
//! ├── camera.rs        # Orbit camera (Z up)
//! ├── config.rs        # Serializable renderer settings
//! ├── picking.rs       # Ray-triangle picking
//! ├── pipeline.rs      # Face and line pipelines
//! ├── sub_renderers/   # Grid, face and edge renderers
//! └── renderer/        # Main Renderer and shape management
//! ```

pub mod bounds;
pub mod camera;
pub mod config;
pub mod constants;
pub mod picking;
pub mod pipeline;
pub mod renderer;
pub mod sub_renderers;
pub mod vertex;

pub use bounds::BoundingBox;
pub use camera::{Camera, CameraUniform};
pub use config::{CameraConfig, GridConfig, RendererConfig, ViewportConfig};
pub use renderer::{Renderer, ShapeStyle};
pub use vertex::{MeshVertex, PositionColorVertex};
