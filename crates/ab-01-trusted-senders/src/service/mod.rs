//! # Service Layer
//!
//! `TrustedSenderStore` owns persistence and migration;
//! `TrustedSenderPolicy` is the authorization façade over it.

mod policy;
mod store;

pub use policy::TrustedSenderPolicy;
pub use store::{
    MigrationOutcome, TrustedSenderStore, CURRENT_STORAGE_VERSION, KEY_SENDERS,
    KEY_STORAGE_VERSION,
};
