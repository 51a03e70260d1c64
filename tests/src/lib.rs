//! # Androbot Test Suite
//!
//! Cross-subsystem flows that no single crate can test alone.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs         # Router + policy + engine, in-memory stores
//!     └── persistence.rs   # File-backed stores, migration, concurrency
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ab-tests
//! cargo test -p ab-tests integration::persistence
//! ```

pub mod integration;
