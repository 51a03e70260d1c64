//! Prometheus metrics for Androbot subsystems.
//!
//! All metrics follow the naming convention: `ab_<subsystem>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Gauge, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // TRUSTED SENDER METRICS (Subsystem 1)
    // =========================================================================

    /// Trust-list mutations
    pub static ref TRUST_MUTATIONS: CounterVec = CounterVec::new(
        Opts::new("ab_trust_mutations_total", "Trusted sender list mutations"),
        &["action", "outcome"]  // action: add/remove, outcome: changed/unchanged/error
    ).expect("metric creation failed");

    /// Current number of trusted senders
    pub static ref TRUSTED_SENDERS: Gauge = Gauge::new(
        "ab_trust_senders",
        "Number of senders currently on the allow-list"
    ).expect("metric creation failed");

    // =========================================================================
    // COMMAND ENGINE METRICS (Subsystem 2)
    // =========================================================================

    /// Device commands by outcome
    pub static ref DEVICE_COMMANDS: CounterVec = CounterVec::new(
        Opts::new("ab_engine_commands_total", "Device commands executed"),
        &["command", "result"]  // result: EXECUTED/IGNORED
    ).expect("metric creation failed");

    /// Volume writes the platform refused
    pub static ref VOLUME_WRITES_SKIPPED: CounterVec = CounterVec::new(
        Opts::new("ab_engine_volume_writes_skipped_total", "Volume writes skipped per channel"),
        &["channel"]
    ).expect("metric creation failed");

    /// Speakerphone attempts scheduled after a call-back
    pub static ref SPEAKER_ATTEMPTS: Counter = Counter::new(
        "ab_engine_speaker_attempts_total",
        "Speakerphone attempts scheduled"
    ).expect("metric creation failed");

    // =========================================================================
    // ROUTER METRICS (Subsystem 3)
    // =========================================================================

    /// Inbound messages seen
    pub static ref MESSAGES_RECEIVED: Counter = Counter::new(
        "ab_router_messages_received_total",
        "Total inbound messages received"
    ).expect("metric creation failed");

    /// Inbound messages dropped before any action
    pub static ref MESSAGES_DROPPED: CounterVec = CounterVec::new(
        Opts::new("ab_router_messages_dropped_total", "Inbound messages dropped"),
        &["reason"]  // reason: no_trusted_senders/untrusted_sender/storage_fault
    ).expect("metric creation failed");

    // =========================================================================
    // ERROR METRICS
    // =========================================================================

    /// Subsystem errors by type
    pub static ref SUBSYSTEM_ERRORS: CounterVec = CounterVec::new(
        Opts::new("ab_subsystem_errors_total", "Errors by subsystem and type"),
        &["subsystem", "error_type"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Trusted senders
        Box::new(TRUST_MUTATIONS.clone()),
        Box::new(TRUSTED_SENDERS.clone()),
        // Engine
        Box::new(DEVICE_COMMANDS.clone()),
        Box::new(VOLUME_WRITES_SKIPPED.clone()),
        Box::new(SPEAKER_ATTEMPTS.clone()),
        // Router
        Box::new(MESSAGES_RECEIVED.clone()),
        Box::new(MESSAGES_DROPPED.clone()),
        // Errors
        Box::new(SUBSYSTEM_ERRORS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_metrics_twice() {
        register_metrics().unwrap();
        register_metrics().unwrap();
    }

    #[test]
    fn test_counter_increment() {
        MESSAGES_RECEIVED.inc();
        assert!(MESSAGES_RECEIVED.get() >= 1.0);
    }

    #[test]
    fn test_labelled_counter() {
        let before = MESSAGES_DROPPED.with_label_values(&["untrusted_sender"]).get();
        MESSAGES_DROPPED.with_label_values(&["untrusted_sender"]).inc();
        assert!(MESSAGES_DROPPED.with_label_values(&["untrusted_sender"]).get() >= before + 1.0);
    }

    #[test]
    fn test_gauge_set() {
        TRUSTED_SENDERS.set(3.0);
        assert!(TRUSTED_SENDERS.get() >= 0.0);
    }

    #[test]
    fn test_encode_contains_registered_names() {
        register_metrics().unwrap();
        SPEAKER_ATTEMPTS.inc();
        let text = encode_metrics().unwrap();
        assert!(text.contains("ab_engine_speaker_attempts_total"));
    }
}
