//! Last-command audit record.

use serde::Serialize;

/// Preference key of the last sender.
pub const AUDIT_KEY_SENDER: &str = "last_sender";
/// Preference key of the last body.
pub const AUDIT_KEY_BODY: &str = "last_body";
/// Preference key of the last result name.
pub const AUDIT_KEY_RESULT: &str = "last_result";
/// Preference key of the last timestamp (Unix millis).
pub const AUDIT_KEY_TIMESTAMP: &str = "last_timestamp";

/// The most recent device command seen after authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandAudit {
    /// Sender address, absent when the transport reported none.
    pub sender: Option<String>,
    /// Raw body.
    pub body: String,
    /// `EXECUTED` or `IGNORED`.
    pub result: String,
    /// Unix timestamp in milliseconds.
    pub timestamp_ms: i64,
}
