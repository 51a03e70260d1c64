//! # Androbot Telemetry
//!
//! Structured logging and Prometheus metrics shared by every subsystem.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use androbot_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_telemetry(TelemetryConfig::from_env())?;
//!     // log lines and counters are now collected
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AB_SERVICE_NAME` | `androbot` | Service name in log lines |
//! | `AB_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `AB_JSON_LOGS` | `false` (`true` in containers) | JSON log output |
//! | `AB_CONSOLE_OUTPUT` | `true` | Write logs to stderr |

#![warn(missing_docs)]

mod config;
mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, DEVICE_COMMANDS, MESSAGES_DROPPED, MESSAGES_RECEIVED,
    REGISTRY, SPEAKER_ATTEMPTS, SUBSYSTEM_ERRORS, TRUSTED_SENDERS, TRUST_MUTATIONS,
    VOLUME_WRITES_SKIPPED,
};
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    /// Metric registration or encoding failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// The configuration is not usable.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics, then install the global tracing subscriber.
pub fn init_telemetry(config: TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_tracing(&config)
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
