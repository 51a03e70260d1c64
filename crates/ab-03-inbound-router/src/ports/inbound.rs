//! Inbound port for the router.

use crate::domain::{InboundMessage, RouteOutcome};
use async_trait::async_trait;

/// Entry point the transport calls for every delivered message.
#[async_trait]
pub trait InboundRouterApi: Send + Sync {
    /// Route one message. Never fails; faults become drops.
    async fn route(&self, message: InboundMessage) -> RouteOutcome;
}
