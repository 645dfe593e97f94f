//! BRep Demo Frontend
//!
//! egui application that builds a box one topological stage at a time.

pub mod actions;
pub mod app;
pub mod panels;
pub mod state;
pub mod viewer;

// Re-exports for convenience
pub use app::BrepDemoApp;
pub use state::{AppAction, AppState, SharedAppState};
