//! Outbound ports for the router.

use crate::domain::{CommandAudit, RouterError};
use ab_02_command_engine::ExecutionResult;
use std::sync::atomic::{AtomicI64, Ordering};

/// Records the last device command.
pub trait CommandAuditor: Send + Sync {
    /// Persist `body` from `sender` with its `result`.
    fn record(
        &self,
        sender: Option<&str>,
        body: &str,
        result: ExecutionResult,
    ) -> Result<CommandAudit, RouterError>;
}

/// Abstract interface for time (enables deterministic testing).
pub trait TimeSource: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Default time source using system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_millis(&self) -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Time source returning a settable instant.
#[derive(Debug, Default)]
pub struct FixedTimeSource {
    now: AtomicI64,
}

impl FixedTimeSource {
    /// Start at `millis`.
    pub fn new(millis: i64) -> Self {
        Self {
            now: AtomicI64::new(millis),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl TimeSource for FixedTimeSource {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
