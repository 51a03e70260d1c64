//! # Inbound Ports
//!
//! API trait defining what the Trusted Senders subsystem can do.
//! Both the inbound router and the management interface drive it.

use crate::domain::{NormalizedNumber, TrustError};

/// Trusted sender API - inbound port.
pub trait TrustedSenderApi: Send + Sync {
    /// Is the normalized form of `sender` in the allow-list?
    fn is_trusted(&self, sender: &str) -> Result<bool, TrustError>;

    /// Sorted, duplicate-free, blank-free allow-list.
    fn trusted_senders(&self) -> Result<Vec<NormalizedNumber>, TrustError>;

    /// Add a sender. `Ok(false)` if blank or already present.
    fn add_trusted_sender(&self, sender: &str) -> Result<bool, TrustError>;

    /// Remove a sender. `Ok(false)` if blank or not present.
    fn remove_trusted_sender(&self, sender: &str) -> Result<bool, TrustError>;
}
