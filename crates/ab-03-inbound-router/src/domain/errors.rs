//! Error types for the Inbound Router subsystem.

use ab_01_trusted_senders::{StorageError, TrustError};
use thiserror::Error;

/// Router errors. Never escape `route`; they become logged drops.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Allow-list lookup or mutation failed.
    #[error("trust check failed: {0}")]
    Trust(#[from] TrustError),

    /// Audit persistence failed.
    #[error("audit storage failed: {0}")]
    Audit(#[from] StorageError),
}

impl RouterError {
    /// Label for the error metric.
    pub fn kind(&self) -> &'static str {
        match self {
            RouterError::Trust(_) => "trust",
            RouterError::Audit(_) => "audit",
        }
    }
}
