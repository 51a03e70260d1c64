//! # Service Layer

mod audit_store;
mod router;

pub use audit_store::CommandAuditStore;
pub use router::InboundRouter;
