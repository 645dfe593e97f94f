//! B-rep Kernel Abstraction
//!
//! This crate provides:
//! - The `BrepKernel` trait with opaque, kernel-owned shape handles
//! - A pure Rust backend built on the Truck B-rep library
//! - Polygon sewing into consistently oriented shells
//! - Mass properties and STL export of tessellated shapes

pub mod export;
pub mod kernel;
pub mod polygon;
pub mod properties;
pub mod sewing;

// Re-exports for convenience
pub use export::export_stl;
pub use kernel::{
    BrepKernel, DEFAULT_SEWING_TOLERANCE, EdgeInfo, FaceHandle, FaceTopology, KernelError,
    KernelResult, NullKernel, ShapeHandle, ShapeKind, ShellHandle, ShellTopology, SolidHandle,
    SolidTopology, TessellatedMesh, default_kernel,
};
pub use properties::MassProperties;

#[cfg(feature = "truck")]
pub use kernel::TruckKernel;
