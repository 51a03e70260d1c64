//! # Domain Module
//!
//! Core domain types for the Command Engine subsystem.

pub mod commands;
pub mod config;
pub mod dial;
pub mod errors;
pub mod value_objects;

pub use commands::*;
pub use config::*;
pub use dial::*;
pub use errors::*;
pub use value_objects::*;
