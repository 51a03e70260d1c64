//! # AB-02 Command Engine
//!
//! Strict text-command grammar and best-effort dispatch to device
//! capabilities.
//!
//! **Subsystem ID:** 02
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Grammar
//!
//! | Body | Command |
//! |------|---------|
//! | `volume max` | `VolumeMax` |
//! | `volume min` | `VolumeMin` |
//! | `volume <0-100>` | `VolumePercent(n)` |
//! | `call me back` | `CallMeBack` |
//!
//! Matching is case-insensitive on the trimmed body. Anything else,
//! including an out-of-range percent, is rejected and reported `IGNORED`.
//!
//! ## Execution
//!
//! - Volume commands set every controlled channel to `round(p/100 * max)`.
//!   A channel the platform refuses is skipped; the command still counts as
//!   `EXECUTED`.
//! - `CallMeBack` dials the sender through the primary calling capability,
//!   then the fallback. Once a call is initiated, speakerphone attempts are
//!   scheduled as independent fire-and-forget tasks.
//!
//! ## Module Structure
//!
//! ```text
//! ab-02-command-engine/
//! ├── domain/          # Command, Percent, AudioChannel, DialNumber, config, errors
//! ├── algorithms/      # Volume level computation
//! ├── ports/           # CommandEngineApi, AudioControl, CallPlacer, TaskScheduler
//! ├── adapters/        # Tokio/manual schedulers, mock capabilities
//! └── service/         # CommandEngine
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{
    AudioCall, GrantedCallPermission, ManualScheduler, MockAudioControl, MockCallPermission,
    MockCallPlacer, TokioScheduler,
};
pub use algorithms::target_level;
pub use domain::{
    normalize_dial_target, parse_command, AudioChannel, CapabilityError, Command, ConfigError,
    DialNumber, EngineConfig, ExecutionReport, ExecutionResult, Percent,
    DEFAULT_SPEAKER_DELAYS_MS, MAX_SPEAKER_DELAY,
};
pub use ports::{
    AudioControl, CallPermission, CallPlacer, CommandEngineApi, ScheduledTask, TaskScheduler,
};
pub use service::CommandEngine;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
