//! Error types for the Command Engine subsystem.

use super::value_objects::AudioChannel;
use std::time::Duration;
use thiserror::Error;

/// Failure reported by a device capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    /// The platform refused the operation on security grounds.
    #[error("permission denied: {operation}")]
    PermissionDenied {
        /// Operation that was refused
        operation: String,
    },

    /// The capability does not exist on this device.
    #[error("capability unavailable: {capability}")]
    Unavailable {
        /// Missing capability
        capability: String,
    },

    /// Any other platform failure.
    #[error("platform error: {message}")]
    Platform {
        /// Error message
        message: String,
    },
}

impl CapabilityError {
    /// Shorthand for [`CapabilityError::PermissionDenied`].
    pub fn denied(operation: impl Into<String>) -> Self {
        Self::PermissionDenied {
            operation: operation.into(),
        }
    }

    /// Shorthand for [`CapabilityError::Unavailable`].
    pub fn unavailable(capability: impl Into<String>) -> Self {
        Self::Unavailable {
            capability: capability.into(),
        }
    }

    /// Shorthand for [`CapabilityError::Platform`].
    pub fn platform(message: impl Into<String>) -> Self {
        Self::Platform {
            message: message.into(),
        }
    }

    /// True for security refusals.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}

/// Invalid engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No channels to control.
    #[error("at least one audio channel must be controlled")]
    NoChannels,

    /// A channel is listed twice.
    #[error("audio channel listed more than once: {0}")]
    DuplicateChannel(AudioChannel),

    /// Speaker delays must not decrease.
    #[error("speaker delays must be non-decreasing")]
    UnorderedDelays,

    /// A delay exceeds the allowed maximum.
    #[error("speaker delay {delay:?} exceeds maximum {max:?}")]
    DelayTooLong {
        /// Offending delay
        delay: Duration,
        /// Allowed maximum
        max: Duration,
    },

    /// A value could not be parsed.
    #[error("invalid value for {field}: {value}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Raw value
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_error_display() {
        assert_eq!(
            CapabilityError::denied("set_level(media)").to_string(),
            "permission denied: set_level(media)"
        );
        assert_eq!(
            CapabilityError::unavailable("telecom").to_string(),
            "capability unavailable: telecom"
        );
        assert!(CapabilityError::denied("x").is_permission_denied());
        assert!(!CapabilityError::platform("x").is_permission_denied());
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::DuplicateChannel(AudioChannel::Ring).to_string(),
            "audio channel listed more than once: ring"
        );
    }
}
