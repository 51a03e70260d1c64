//! Inbound message.

use serde::{Deserialize, Serialize};

/// A message delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Originating address as reported by the transport.
    #[serde(default)]
    pub sender: Option<String>,
    /// Message text.
    #[serde(default)]
    pub body: String,
}

impl InboundMessage {
    /// Message from `sender`.
    pub fn new(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender: Some(sender.into()),
            body: body.into(),
        }
    }

    /// Message with no originating address.
    pub fn anonymous(body: impl Into<String>) -> Self {
        Self {
            sender: None,
            body: body.into(),
        }
    }

    /// Sender address, `None` when missing or blank.
    pub fn sender(&self) -> Option<&str> {
        self.sender
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
