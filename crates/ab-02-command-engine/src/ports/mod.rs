//! # Ports Layer
//!
//! Inbound: `CommandEngineApi`, what the router drives.
//! Outbound: device capabilities and the delayed-task scheduler.

pub mod inbound;
pub mod outbound;

pub use inbound::CommandEngineApi;
pub use outbound::{AudioControl, CallPermission, CallPlacer, ScheduledTask, TaskScheduler};
