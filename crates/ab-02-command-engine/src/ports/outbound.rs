//! Outbound ports: device capabilities the engine depends on.

use crate::domain::{AudioChannel, CapabilityError, DialNumber};
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::time::Duration;

/// Per-channel volume control plus the speakerphone route.
#[async_trait]
pub trait AudioControl: Send + Sync {
    /// Maximum level of `channel`.
    async fn max_level(&self, channel: AudioChannel) -> Result<u32, CapabilityError>;

    /// Current level of `channel`.
    async fn current_level(&self, channel: AudioChannel) -> Result<u32, CapabilityError>;

    /// Set `channel` to `level`. Callers keep `level <= max_level`.
    async fn set_level(&self, channel: AudioChannel, level: u32) -> Result<(), CapabilityError>;

    /// Switch audio to in-communication mode and route it to the speaker.
    async fn enable_speakerphone(&self) -> Result<(), CapabilityError>;
}

/// Something that can initiate an outgoing call.
#[async_trait]
pub trait CallPlacer: Send + Sync {
    /// Name for logs.
    fn name(&self) -> &str;

    /// Initiate a call to `number`. Returns once the call is placed, not
    /// when it connects.
    async fn place_call(&self, number: &DialNumber) -> Result<(), CapabilityError>;
}

/// Gate checked before any call is attempted.
pub trait CallPermission: Send + Sync {
    /// Whether outgoing calls are currently allowed.
    fn can_place_calls(&self) -> bool;
}

/// Future run by a [`TaskScheduler`].
pub type ScheduledTask = BoxFuture<'static, ()>;

/// Runs tasks after a delay, detached from the caller.
pub trait TaskScheduler: Send + Sync {
    /// Run `task` once `delay` has elapsed. Must not block.
    fn schedule(&self, delay: Duration, task: ScheduledTask);
}
