//! Command Engine service.
//!
//! Parses a body, then drives the audio and calling capabilities. Every
//! capability failure is contained here; callers only see
//! `EXECUTED` or `IGNORED`.

use crate::adapters::GrantedCallPermission;
use crate::algorithms::target_level;
use crate::domain::{
    normalize_dial_target, parse_command, AudioChannel, Command, ConfigError, EngineConfig,
    ExecutionReport, ExecutionResult, Percent,
};
use crate::ports::{AudioControl, CallPermission, CallPlacer, CommandEngineApi, TaskScheduler};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Command Engine.
pub struct CommandEngine {
    audio: Arc<dyn AudioControl>,
    primary_caller: Option<Arc<dyn CallPlacer>>,
    fallback_caller: Option<Arc<dyn CallPlacer>>,
    permission: Arc<dyn CallPermission>,
    scheduler: Arc<dyn TaskScheduler>,
    config: EngineConfig,
}

impl CommandEngine {
    /// Engine with default configuration, no calling capability and
    /// permission granted.
    pub fn new(audio: Arc<dyn AudioControl>, scheduler: Arc<dyn TaskScheduler>) -> Self {
        Self {
            audio,
            primary_caller: None,
            fallback_caller: None,
            permission: Arc::new(GrantedCallPermission),
            scheduler,
            config: EngineConfig::default(),
        }
    }

    /// Replace the configuration after validating it.
    pub fn with_config(mut self, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Preferred calling capability.
    pub fn with_primary_caller(mut self, caller: Arc<dyn CallPlacer>) -> Self {
        self.primary_caller = Some(caller);
        self
    }

    /// Calling capability tried when the primary is absent or fails.
    pub fn with_fallback_caller(mut self, caller: Arc<dyn CallPlacer>) -> Self {
        self.fallback_caller = Some(caller);
        self
    }

    /// Permission gate checked before dialing.
    pub fn with_call_permission(mut self, permission: Arc<dyn CallPermission>) -> Self {
        self.permission = permission;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    async fn apply_volume(&self, percent: Percent, report: &mut ExecutionReport) {
        for &channel in &self.config.channels {
            match self.set_channel(channel, percent).await {
                Some(level) => report.channels_set.push((channel, level)),
                None => report.channels_skipped.push(channel),
            }
        }
        info!(
            "[ab-02] Volume {} applied: {} set, {} skipped",
            percent,
            report.channels_set.len(),
            report.channels_skipped.len()
        );
    }

    async fn set_channel(&self, channel: AudioChannel, percent: Percent) -> Option<u32> {
        let level = if percent == Percent::MIN {
            0
        } else {
            match self.audio.max_level(channel).await {
                Ok(max) => target_level(percent, max),
                Err(err) => {
                    warn!("[ab-02] Cannot read max level of {}: {}", channel, err);
                    return None;
                }
            }
        };

        let previous = self.audio.current_level(channel).await.ok();
        match self.audio.set_level(channel, level).await {
            Ok(()) => {
                debug!("[ab-02] {}: {:?} -> {}", channel, previous, level);
                Some(level)
            }
            Err(err) if err.is_permission_denied() => {
                info!("[ab-02] Skipping {}, blocked by device policy: {}", channel, err);
                None
            }
            Err(err) => {
                warn!("[ab-02] Failed to set {}: {}", channel, err);
                None
            }
        }
    }

    async fn call_back(&self, sender: Option<&str>, report: &mut ExecutionReport) {
        let Some(sender) = sender.map(str::trim).filter(|s| !s.is_empty()) else {
            info!("[ab-02] call me back without a sender address");
            return;
        };
        let Some(number) = normalize_dial_target(sender) else {
            info!("[ab-02] Sender {:?} is not dialable", sender);
            return;
        };
        if !self.permission.can_place_calls() {
            warn!("[ab-02] Call permission not granted, not calling {}", number);
            return;
        }

        let placers: Vec<&Arc<dyn CallPlacer>> = self
            .primary_caller
            .iter()
            .chain(self.fallback_caller.iter())
            .collect();
        if placers.is_empty() {
            warn!("[ab-02] No calling capability available");
            return;
        }

        for placer in placers {
            match placer.place_call(&number).await {
                Ok(()) => {
                    info!("[ab-02] Calling {} via {}", number, placer.name());
                    report.speaker_attempts = self.schedule_speakerphone();
                    report.result = ExecutionResult::Executed;
                    return;
                }
                Err(err) => {
                    warn!("[ab-02] {} could not call {}: {}", placer.name(), number, err);
                }
            }
        }
    }

    fn schedule_speakerphone(&self) -> usize {
        let delays = &self.config.speaker_delays;
        for (attempt, delay) in delays.iter().enumerate() {
            let audio = Arc::clone(&self.audio);
            let attempt = attempt + 1;
            self.scheduler.schedule(
                *delay,
                Box::pin(async move {
                    match audio.enable_speakerphone().await {
                        Ok(()) => debug!("[ab-02] Speakerphone attempt {} ok", attempt),
                        Err(err) if err.is_permission_denied() => {
                            info!("[ab-02] Speakerphone attempt {} blocked: {}", attempt, err)
                        }
                        Err(err) => {
                            warn!("[ab-02] Speakerphone attempt {} failed: {}", attempt, err)
                        }
                    }
                }),
            );
        }
        delays.len()
    }
}

#[async_trait]
impl CommandEngineApi for CommandEngine {
    async fn execute_detailed(&self, raw: &str, sender: Option<&str>) -> ExecutionReport {
        let Some(command) = parse_command(raw) else {
            debug!("[ab-02] Body is not a device command");
            return ExecutionReport::ignored(None);
        };
        debug!("[ab-02] Executing {}", command.name());

        let mut report = ExecutionReport::ignored(Some(command));
        match command {
            Command::VolumeMax | Command::VolumeMin | Command::VolumePercent(_) => {
                if let Some(percent) = command.volume_percent() {
                    self.apply_volume(percent, &mut report).await;
                    report.result = ExecutionResult::Executed;
                }
            }
            Command::CallMeBack => self.call_back(sender, &mut report).await,
        }
        report
    }
}
