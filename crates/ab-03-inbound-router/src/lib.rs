//! # AB-03 Inbound Router
//!
//! Decides, for every inbound message, whether anything happens at all.
//!
//! **Subsystem ID:** 03
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Routing Order
//!
//! | Step | Condition | Outcome |
//! |------|-----------|---------|
//! | 1 | allow-list empty | dropped (`no_trusted_senders`) |
//! | 2 | body is `trusted add/remove/list` and sender untrusted | dropped (`untrusted_sender`) |
//! | 3 | body is `trusted add/remove/list` | policy mutation or listing |
//! | 4 | sender untrusted | dropped (`untrusted_sender`) |
//! | 5 | otherwise | handed to the command engine, result audited |
//!
//! A storage fault at any step drops the message (`storage_fault`).
//! Nothing is ever sent back to the sender.
//!
//! ## Module Structure
//!
//! ```text
//! ab-03-inbound-router/
//! ├── domain/          # InboundMessage, RouteOutcome, CommandAudit, errors
//! ├── ports/           # InboundRouterApi, CommandAuditor, TimeSource
//! └── service/         # InboundRouter, CommandAuditStore
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{
    CommandAudit, DropReason, InboundMessage, ManagementOutcome, RouteOutcome, RouterError,
};
pub use ports::{CommandAuditor, FixedTimeSource, InboundRouterApi, SystemTimeSource, TimeSource};
pub use service::{CommandAuditStore, InboundRouter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
