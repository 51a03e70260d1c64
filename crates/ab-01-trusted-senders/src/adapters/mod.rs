//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the `PreferenceStore` outbound port.

mod file;
mod memory;

pub use file::FilePreferenceStore;
pub use memory::InMemoryPreferenceStore;
