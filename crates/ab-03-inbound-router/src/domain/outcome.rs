//! Routing outcomes.

use ab_01_trusted_senders::NormalizedNumber;
use ab_02_command_engine::{ExecutionReport, ExecutionResult};
use std::fmt;

/// Why a message was dropped without any action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// The allow-list is empty.
    NoTrustedSenders,
    /// The sender is missing or not on the allow-list.
    UntrustedSender,
    /// Trust could not be established because storage failed.
    StorageFault,
}

impl DropReason {
    /// Metric label.
    pub fn as_str(self) -> &'static str {
        match self {
            DropReason::NoTrustedSenders => "no_trusted_senders",
            DropReason::UntrustedSender => "untrusted_sender",
            DropReason::StorageFault => "storage_fault",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a management command from a trusted sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagementOutcome {
    /// `trusted add`; `changed` is false when already present or blank.
    Added {
        /// Raw argument as sent
        sender: String,
        /// Whether the list changed
        changed: bool,
    },
    /// `trusted remove`; `changed` is false when not present or blank.
    Removed {
        /// Raw argument as sent
        sender: String,
        /// Whether the list changed
        changed: bool,
    },
    /// `trusted list`
    Listed(Vec<NormalizedNumber>),
}

/// What the router did with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Nothing happened.
    Dropped(DropReason),
    /// A management command was applied.
    Management(ManagementOutcome),
    /// The body went to the command engine.
    Device(ExecutionReport),
}

impl RouteOutcome {
    /// Device result as seen by the sender: anything but an executed device
    /// command counts as `IGNORED`.
    pub fn execution_result(&self) -> ExecutionResult {
        match self {
            RouteOutcome::Device(report) => report.result,
            _ => ExecutionResult::Ignored,
        }
    }

    /// True for `Dropped`.
    pub fn is_dropped(&self) -> bool {
        matches!(self, RouteOutcome::Dropped(_))
    }
}
