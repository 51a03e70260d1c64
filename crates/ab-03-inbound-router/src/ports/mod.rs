//! # Ports Layer

pub mod inbound;
pub mod outbound;

pub use inbound::InboundRouterApi;
pub use outbound::{CommandAuditor, FixedTimeSource, SystemTimeSource, TimeSource};
