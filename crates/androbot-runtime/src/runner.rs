//! Message loop for `androbot run`.
//!
//! Reads one JSON message per line, routes each on its own task and writes
//! one JSON outcome line per message, in input order.

use ab_02_command_engine::ExecutionResult;
use ab_03_inbound_router::{
    InboundMessage, InboundRouter, InboundRouterApi, ManagementOutcome, RouteOutcome,
};
use anyhow::{Context, Result};
use futures::future::{self, BoxFuture, FutureExt};
use futures::stream::{FuturesOrdered, StreamExt};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinError;
use tracing::{info, warn};

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines that parsed into messages.
    pub received: usize,
    /// Lines that did not.
    pub malformed: usize,
    /// Device commands executed.
    pub executed: usize,
    /// Speakerphone attempts scheduled.
    pub speaker_attempts: usize,
}

/// JSON description of an outcome.
pub fn describe(outcome: &RouteOutcome) -> Value {
    match outcome {
        RouteOutcome::Dropped(reason) => json!({ "outcome": "dropped", "reason": reason.as_str() }),
        RouteOutcome::Management(ManagementOutcome::Added { sender, changed }) => {
            json!({ "outcome": "trusted_add", "sender": sender, "changed": changed })
        }
        RouteOutcome::Management(ManagementOutcome::Removed { sender, changed }) => {
            json!({ "outcome": "trusted_remove", "sender": sender, "changed": changed })
        }
        RouteOutcome::Management(ManagementOutcome::Listed(senders)) => {
            json!({ "outcome": "trusted_list", "senders": senders })
        }
        RouteOutcome::Device(report) => json!({
            "outcome": "device",
            "command": report.command.map(|c| c.name()),
            "result": report.result.as_str(),
        }),
    }
}

/// Most messages routed at once. Reading pauses while this many are pending.
pub const MAX_IN_FLIGHT: usize = 64;

/// Pending slot in the output stream. `None` marks a malformed line.
type Slot = BoxFuture<'static, (usize, Option<Result<RouteOutcome, JoinError>>)>;

/// Route every message in `input`, writing outcomes to `output`.
///
/// Outcomes are written as soon as every earlier line has one, so a live
/// stream sees results while input is still open. Waits `speaker_grace`
/// after the last message when any speakerphone attempt was scheduled, so
/// detached attempts finish before returning.
pub async fn run_messages<R, W>(
    router: Arc<InboundRouter>,
    input: R,
    mut output: W,
    speaker_grace: Duration,
) -> Result<RunSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut summary = RunSummary::default();
    let mut pending: FuturesOrdered<Slot> = FuturesOrdered::new();
    let mut lines = input.lines();
    let mut line_no = 0usize;
    let mut input_open = true;

    loop {
        tokio::select! {
            next = lines.next_line(), if input_open && pending.len() < MAX_IN_FLIGHT => {
                let Some(line) = next.context("reading messages")? else {
                    input_open = false;
                    continue;
                };
                line_no += 1;
                if line.trim().is_empty() {
                    continue;
                }
                let at = line_no;
                match serde_json::from_str::<InboundMessage>(&line) {
                    Ok(message) => {
                        summary.received += 1;
                        let router = Arc::clone(&router);
                        let task = tokio::spawn(async move { router.route(message).await });
                        pending.push_back(async move { (at, Some(task.await)) }.boxed());
                    }
                    Err(err) => {
                        warn!("Skipping line {}: {}", at, err);
                        summary.malformed += 1;
                        pending.push_back(future::ready((at, None)).boxed());
                    }
                }
            }
            Some((at, routed)) = pending.next(), if !pending.is_empty() => {
                let value = match routed {
                    None => json!({ "line": at, "outcome": "malformed" }),
                    Some(joined) => {
                        let outcome = joined.context("message task failed")?;
                        if let RouteOutcome::Device(report) = &outcome {
                            if report.result == ExecutionResult::Executed {
                                summary.executed += 1;
                            }
                            summary.speaker_attempts += report.speaker_attempts;
                        }
                        let mut value = describe(&outcome);
                        value["line"] = json!(at);
                        value
                    }
                };
                write_line(&mut output, &value).await?;
                output.flush().await?;
            }
            else => break,
        }
    }

    if summary.speaker_attempts > 0 {
        tokio::time::sleep(speaker_grace).await;
    }
    info!(
        "Processed {} messages ({} malformed, {} executed)",
        summary.received, summary.malformed, summary.executed
    );
    Ok(summary)
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, value: &Value) -> Result<()> {
    let mut line = serde_json::to_vec(value)?;
    line.push(b'\n');
    output.write_all(&line).await?;
    Ok(())
}
