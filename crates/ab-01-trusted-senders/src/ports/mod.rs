//! # Ports Layer
//!
//! Inbound API trait and the persistence dependency.

pub mod inbound;
pub mod outbound;

pub use inbound::TrustedSenderApi;
pub use outbound::{PreferenceEdit, PreferenceStore, PreferenceValue, Preferences};
