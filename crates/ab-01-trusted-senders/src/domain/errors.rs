//! # Domain Errors
//!
//! Error types for the Trusted Senders subsystem.
//!
//! Validation problems (blank numbers, unknown commands) are not errors here:
//! they surface as `false` / `None`. Only persistence faults are errors.

use thiserror::Error;

/// Failures raised by a `PreferenceStore` adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error description
        message: String,
    },

    /// Persisted data could not be decoded.
    #[error("Corrupt preferences at {path}: {message}")]
    Corrupt {
        /// Location of the damaged data
        path: String,
        /// Decoder message
        message: String,
    },

    /// Stored value has a different type than the caller asked for.
    #[error("Type mismatch for key '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Preference key
        key: String,
        /// Requested value kind
        expected: &'static str,
        /// Stored value kind
        found: &'static str,
    },

    /// Could not take the store lock.
    #[error("Lock failed: {message}")]
    LockFailed {
        /// Error description
        message: String,
    },
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io {
            message: err.to_string(),
        }
    }
}

/// Trusted sender store and policy errors.
#[derive(Debug, Error)]
pub enum TrustError {
    /// Persistence layer failure.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Persisted schema version cannot be read as a version number.
    #[error("Invalid storage version: {0}")]
    InvalidVersion(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_error() {
        let err = StorageError::TypeMismatch {
            key: "senders".to_string(),
            expected: "string_set",
            found: "int",
        };
        assert!(err.to_string().contains("senders"));
        assert!(err.to_string().contains("string_set"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StorageError = io.into();
        assert!(matches!(err, StorageError::Io { .. }));
    }

    #[test]
    fn test_trust_error_wraps_storage() {
        let err: TrustError = StorageError::LockFailed {
            message: "busy".to_string(),
        }
        .into();
        assert!(err.to_string().contains("busy"));
    }
}
