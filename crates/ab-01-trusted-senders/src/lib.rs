//! # AB-01 Trusted Senders
//!
//! Normalized, deduplicated allow-list of remote senders.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Decide whether the originator of an inbound message may act on the device:
//! - Phone-number normalization so every textual form of a number compares equal
//! - Persistent sender set with a one-time, version-guarded migration
//! - Management grammar (`trusted add|remove|list`) for in-band list changes
//!
//! ## Guarantees
//!
//! | Property | Description |
//! |----------|-------------|
//! | Idempotent normalization | `normalize(normalize(x)) == normalize(x)` |
//! | Set semantics | No duplicates, no blank entries |
//! | Stable enumeration | `get_all` is always sorted |
//! | Atomic mutation | Every add/remove/migration is one read-modify-write commit |
//! | Skip-safe migration | Version guard makes a re-run a no-op |
//!
//! ## Module Structure
//!
//! ```text
//! ab-01-trusted-senders/
//! ├── domain/          # NormalizedNumber, TrustedSenderCommand, errors
//! ├── ports/           # TrustedSenderApi, PreferenceStore
//! ├── adapters/        # In-memory and file-backed preference stores
//! └── service/         # TrustedSenderStore, TrustedSenderPolicy
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{FilePreferenceStore, InMemoryPreferenceStore};
pub use domain::{normalize, NormalizedNumber, StorageError, TrustError, TrustedSenderCommand};
pub use ports::{
    PreferenceEdit, PreferenceStore, PreferenceValue, Preferences, TrustedSenderApi,
};
pub use service::{
    MigrationOutcome, TrustedSenderPolicy, TrustedSenderStore, CURRENT_STORAGE_VERSION,
    KEY_SENDERS, KEY_STORAGE_VERSION,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
