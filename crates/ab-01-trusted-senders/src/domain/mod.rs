//! # Domain Module
//!
//! Core domain types for the Trusted Senders subsystem.

pub mod commands;
pub mod errors;
pub mod normalizer;

pub use commands::*;
pub use errors::*;
pub use normalizer::*;
