//! Inbound Router service.

use crate::domain::{DropReason, InboundMessage, ManagementOutcome, RouteOutcome, RouterError};
use crate::ports::{CommandAuditor, InboundRouterApi};
use ab_01_trusted_senders::{TrustError, TrustedSenderApi, TrustedSenderCommand};
use ab_02_command_engine::{CommandEngineApi, ExecutionReport};
use androbot_telemetry::{
    metric_inc, DEVICE_COMMANDS, MESSAGES_DROPPED, MESSAGES_RECEIVED, SPEAKER_ATTEMPTS,
    SUBSYSTEM_ERRORS, TRUSTED_SENDERS, TRUST_MUTATIONS, VOLUME_WRITES_SKIPPED,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Inbound Router.
pub struct InboundRouter {
    policy: Arc<dyn TrustedSenderApi>,
    engine: Arc<dyn CommandEngineApi>,
    auditor: Option<Arc<dyn CommandAuditor>>,
}

impl InboundRouter {
    /// Router without a command audit.
    pub fn new(policy: Arc<dyn TrustedSenderApi>, engine: Arc<dyn CommandEngineApi>) -> Self {
        Self {
            policy,
            engine,
            auditor: None,
        }
    }

    /// Record every authorized device command into `auditor`.
    pub fn with_auditor(mut self, auditor: Arc<dyn CommandAuditor>) -> Self {
        self.auditor = Some(auditor);
        self
    }

    fn drop_message(&self, reason: DropReason) -> RouteOutcome {
        metric_inc!(MESSAGES_DROPPED, &[reason.as_str()]);
        RouteOutcome::Dropped(reason)
    }

    fn fault(&self, err: RouterError) -> RouteOutcome {
        warn!("[ab-03] Dropping message, {}", err);
        metric_inc!(SUBSYSTEM_ERRORS, &["ab-03", err.kind()]);
        self.drop_message(DropReason::StorageFault)
    }

    fn is_trusted(&self, sender: Option<&str>) -> Result<bool, RouterError> {
        match sender {
            Some(sender) => Ok(self.policy.is_trusted(sender)?),
            None => Ok(false),
        }
    }

    fn manage(
        &self,
        command: TrustedSenderCommand,
        sender: &str,
    ) -> Result<RouteOutcome, RouterError> {
        let outcome = match command {
            TrustedSenderCommand::Add(raw) => {
                let changed = self.record_mutation("add", self.policy.add_trusted_sender(&raw))?;
                info!("[ab-03] {} trusted add {}: changed={}", sender, raw, changed);
                ManagementOutcome::Added {
                    sender: raw,
                    changed,
                }
            }
            TrustedSenderCommand::Remove(raw) => {
                let changed =
                    self.record_mutation("remove", self.policy.remove_trusted_sender(&raw))?;
                info!("[ab-03] {} trusted remove {}: changed={}", sender, raw, changed);
                ManagementOutcome::Removed {
                    sender: raw,
                    changed,
                }
            }
            TrustedSenderCommand::ListSenders => {
                let senders = self.policy.trusted_senders()?;
                let listing: Vec<&str> = senders.iter().map(|s| s.as_str()).collect();
                info!("[ab-03] {} trusted list: [{}]", sender, listing.join(", "));
                TRUSTED_SENDERS.set(senders.len() as f64);
                ManagementOutcome::Listed(senders)
            }
        };
        Ok(RouteOutcome::Management(outcome))
    }

    fn record_mutation(
        &self,
        action: &str,
        result: Result<bool, TrustError>,
    ) -> Result<bool, RouterError> {
        let label = match &result {
            Ok(true) => "changed",
            Ok(false) => "unchanged",
            Err(_) => "error",
        };
        metric_inc!(TRUST_MUTATIONS, &[action, label]);
        let changed = result?;
        if changed {
            if let Ok(senders) = self.policy.trusted_senders() {
                TRUSTED_SENDERS.set(senders.len() as f64);
            }
        }
        Ok(changed)
    }

    fn observe(&self, message: &InboundMessage, report: &ExecutionReport) {
        let command = report.command.map(|c| c.name()).unwrap_or("unrecognized");
        metric_inc!(DEVICE_COMMANDS, &[command, report.result.as_str()]);
        for channel in &report.channels_skipped {
            metric_inc!(VOLUME_WRITES_SKIPPED, &[channel.as_str()]);
        }
        SPEAKER_ATTEMPTS.inc_by(report.speaker_attempts as f64);

        if let Some(auditor) = &self.auditor {
            if let Err(err) = auditor.record(message.sender(), &message.body, report.result) {
                warn!("[ab-03] Failed to record command audit: {}", err);
                metric_inc!(SUBSYSTEM_ERRORS, &["ab-03", err.kind()]);
            }
        }
    }
}

#[async_trait]
impl InboundRouterApi for InboundRouter {
    async fn route(&self, message: InboundMessage) -> RouteOutcome {
        metric_inc!(MESSAGES_RECEIVED);
        let sender = message.sender();

        let trusted_count = match self.policy.trusted_senders() {
            Ok(senders) => senders.len(),
            Err(err) => return self.fault(err.into()),
        };
        TRUSTED_SENDERS.set(trusted_count as f64);
        if trusted_count == 0 {
            info!("[ab-03] No trusted senders configured, ignoring message");
            return self.drop_message(DropReason::NoTrustedSenders);
        }

        let trusted = match self.is_trusted(sender) {
            Ok(trusted) => trusted,
            Err(err) => return self.fault(err),
        };

        if let Some(command) = TrustedSenderCommand::parse(&message.body) {
            let Some(sender) = sender.filter(|_| trusted) else {
                info!(
                    "[ab-03] Ignoring trusted {} from untrusted sender {:?}",
                    command.action(),
                    sender
                );
                return self.drop_message(DropReason::UntrustedSender);
            };
            return match self.manage(command, sender) {
                Ok(outcome) => outcome,
                Err(err) => self.fault(err),
            };
        }

        if !trusted {
            info!("[ab-03] Ignoring message from untrusted sender {:?}", sender);
            return self.drop_message(DropReason::UntrustedSender);
        }

        let report = self.engine.execute_detailed(&message.body, sender).await;
        info!("[ab-03] Command from {:?}: {}", sender, report.result);
        debug!("[ab-03] Report: {:?}", report);
        self.observe(&message, &report);
        RouteOutcome::Device(report)
    }
}
