//! Trusted Sender Policy
//!
//! Authorization façade: a sender may act iff its normalized form is in the
//! allow-list. Storage concerns stay in `TrustedSenderStore`.

use crate::domain::{normalize, NormalizedNumber, TrustError};
use crate::ports::inbound::TrustedSenderApi;
use crate::ports::outbound::PreferenceStore;
use crate::service::store::TrustedSenderStore;
use std::sync::Arc;

/// Trusted Sender Policy implementation.
pub struct TrustedSenderPolicy<S: PreferenceStore> {
    store: TrustedSenderStore<S>,
}

impl<S: PreferenceStore> TrustedSenderPolicy<S> {
    /// Build the policy over an already-opened store.
    pub fn new(store: TrustedSenderStore<S>) -> Self {
        Self { store }
    }

    /// Open the store (running migration) and wrap it.
    pub fn open(prefs: Arc<S>) -> Result<Self, TrustError> {
        Ok(Self::new(TrustedSenderStore::open(prefs)?))
    }

    /// Access the underlying store.
    pub fn store(&self) -> &TrustedSenderStore<S> {
        &self.store
    }
}

impl<S: PreferenceStore> TrustedSenderApi for TrustedSenderPolicy<S> {
    fn is_trusted(&self, sender: &str) -> Result<bool, TrustError> {
        let normalized = normalize(sender);
        if normalized.is_blank() {
            return Ok(false);
        }
        Ok(self.store.get_all()?.contains(&normalized))
    }

    fn trusted_senders(&self) -> Result<Vec<NormalizedNumber>, TrustError> {
        self.store.get_all()
    }

    fn add_trusted_sender(&self, sender: &str) -> Result<bool, TrustError> {
        self.store.add(sender)
    }

    fn remove_trusted_sender(&self, sender: &str) -> Result<bool, TrustError> {
        self.store.remove(sender)
    }
}
