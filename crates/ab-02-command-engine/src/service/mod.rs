//! # Service Layer

mod engine;

pub use engine::CommandEngine;
