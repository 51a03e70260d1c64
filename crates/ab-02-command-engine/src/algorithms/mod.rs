//! # Algorithms
//!
//! Pure computations used by the engine.

pub mod volume;

pub use volume::target_level;
