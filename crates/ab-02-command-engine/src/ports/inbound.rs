//! Inbound port for the Command Engine.

use crate::domain::{ExecutionReport, ExecutionResult};
use async_trait::async_trait;

/// Executes device command bodies.
///
/// Never fails: unrecognized bodies and unavailable capabilities are
/// reported as [`ExecutionResult::Ignored`].
#[async_trait]
pub trait CommandEngineApi: Send + Sync {
    /// Execute `raw` on behalf of `sender`, returning the full report.
    async fn execute_detailed(&self, raw: &str, sender: Option<&str>) -> ExecutionReport;

    /// Execute `raw` on behalf of `sender`.
    async fn execute(&self, raw: &str, sender: Option<&str>) -> ExecutionResult {
        self.execute_detailed(raw, sender).await.result
    }
}
