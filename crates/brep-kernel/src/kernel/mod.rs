//! B-rep kernel abstraction
//!
//! The sequencer and the viewer only see [`BrepKernel`] and the opaque handles.
//! The `truck` feature enables the pure Rust backend.

mod traits;

#[cfg(feature = "truck")]
mod truck;

pub use traits::*;

#[cfg(feature = "truck")]
pub use self::truck::TruckKernel;
