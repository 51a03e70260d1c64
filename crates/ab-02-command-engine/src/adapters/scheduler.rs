//! Task schedulers.

use crate::ports::{ScheduledTask, TaskScheduler};
use parking_lot::Mutex;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::debug;

/// Spawns each task on a tokio runtime, sleeping first for non-zero delays.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    /// Schedule onto `handle`.
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Schedule onto the runtime of the calling context, if any.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl TaskScheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) {
        debug!("[ab-02] Scheduling task in {:?}", delay);
        self.handle.spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            task.await;
        });
    }
}

/// Holds scheduled tasks until the owner runs them.
#[derive(Default)]
pub struct ManualScheduler {
    pending: Mutex<Vec<(Duration, ScheduledTask)>>,
}

impl ManualScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting.
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Delays of waiting tasks, in scheduling order.
    pub fn delays(&self) -> Vec<Duration> {
        self.pending.lock().iter().map(|(d, _)| *d).collect()
    }

    /// Run every waiting task in delay order and return how many ran.
    pub async fn run_all(&self) -> usize {
        let mut tasks = std::mem::take(&mut *self.pending.lock());
        tasks.sort_by_key(|(delay, _)| *delay);
        let count = tasks.len();
        for (_, task) in tasks {
            task.await;
        }
        count
    }
}

impl TaskScheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) {
        self.pending.lock().push((delay, task));
    }
}
