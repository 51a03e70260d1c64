//! # Adapters Layer
//!
//! Schedulers and in-process capability implementations.

mod mock;
mod permission;
mod scheduler;

pub use mock::{AudioCall, MockAudioControl, MockCallPermission, MockCallPlacer};
pub use permission::GrantedCallPermission;
pub use scheduler::{ManualScheduler, TokioScheduler};
