//! # Adapters
//!
//! Device backends the runtime can drive.

pub mod simulated;

pub use simulated::{SimulatedAudio, SimulatedDialer};
