//! # Domain Module

pub mod audit;
pub mod errors;
pub mod message;
pub mod outcome;

pub use audit::*;
pub use errors::*;
pub use message::*;
pub use outcome::*;
