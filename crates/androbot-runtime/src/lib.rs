//! # Androbot Runtime
//!
//! Wiring and command-line front end for the Androbot subsystems.
//!
//! ## Modular Structure
//!
//! - `container/` - Configuration and subsystem wiring
//! - `adapters/` - Simulated device backend
//! - `cli` - Clap definitions and management commands
//! - `runner` - stdin message loop
//!
//! ## Subsystems
//!
//! 1. Trusted Senders (ab-01) - Allow-list, normalization, migration
//! 2. Command Engine (ab-02) - Grammar and device dispatch
//! 3. Inbound Router (ab-03) - Trust gate and command audit

pub mod adapters;
pub mod cli;
pub mod container;
pub mod runner;

pub use container::{RuntimeConfig, SubsystemContainer};
pub use runner::{run_messages, RunSummary};
