//! # Subsystem Container
//!
//! Opens the preference files and wires policy, engine and router.

pub mod config;

pub use config::{ConfigError, RuntimeConfig, StorageConfig};

use crate::adapters::{SimulatedAudio, SimulatedDialer};
use ab_01_trusted_senders::{FilePreferenceStore, TrustedSenderPolicy};
use ab_02_command_engine::{CommandEngine, TokioScheduler};
use ab_03_inbound_router::{CommandAuditStore, InboundRouter};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Allow-list policy over the file store.
pub type FilePolicy = TrustedSenderPolicy<FilePreferenceStore>;
/// Command audit over the file store.
pub type FileAudit = CommandAuditStore<FilePreferenceStore>;

/// Central container holding every subsystem instance.
pub struct SubsystemContainer {
    /// Runtime configuration.
    pub config: RuntimeConfig,
    /// Trusted sender policy (ab-01).
    pub policy: Arc<FilePolicy>,
    /// Last-command audit (ab-03).
    pub audit: Arc<FileAudit>,
}

impl SubsystemContainer {
    /// Open both preference files, running allow-list migration.
    pub fn open(config: RuntimeConfig) -> Result<Self> {
        config.validate()?;

        let trusted_path = config.storage.trusted_path();
        let trusted = FilePreferenceStore::open(&trusted_path)
            .with_context(|| format!("opening allow-list at {}", trusted_path.display()))?;
        let policy = TrustedSenderPolicy::open(Arc::new(trusted))
            .context("migrating trusted sender storage")?;

        let audit_path = config.storage.audit_path();
        let audit = FilePreferenceStore::open(&audit_path)
            .with_context(|| format!("opening command audit at {}", audit_path.display()))?;

        info!("Data Dir: {:?}", config.storage.data_dir);
        Ok(Self {
            config,
            policy: Arc::new(policy),
            audit: Arc::new(CommandAuditStore::new(Arc::new(audit))),
        })
    }

    /// Build a router over the simulated device. Must run inside a tokio
    /// runtime; speakerphone tasks are spawned on it.
    pub fn router(&self, audio: Arc<SimulatedAudio>) -> Result<InboundRouter> {
        let scheduler =
            TokioScheduler::current().context("speakerphone scheduling needs a tokio runtime")?;
        let engine = CommandEngine::new(audio, Arc::new(scheduler))
            .with_config(self.config.engine.clone())?
            .with_primary_caller(Arc::new(SimulatedDialer));

        Ok(InboundRouter::new(self.policy.clone(), Arc::new(engine))
            .with_auditor(self.audit.clone()))
    }
}
