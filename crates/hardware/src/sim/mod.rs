//! Driving loop and program loading.

/// Flat-image loader.
pub mod loader;
/// The step/run driving loop.
pub mod simulator;

pub use loader::{load_flat_binary, LoadError};
pub use simulator::{RunError, Simulator};
