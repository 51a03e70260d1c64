//! # Runtime Configuration
//!
//! Data locations and engine overrides, read from the environment.

use ab_02_command_engine::{ConfigError as EngineConfigError, EngineConfig};
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Default data directory.
pub const DEFAULT_DATA_DIR: &str = "./data";
/// Allow-list file name inside the data directory.
pub const TRUSTED_SENDERS_FILE: &str = "trusted_senders.json";
/// Command audit file name inside the data directory.
pub const COMMAND_AUDIT_FILE: &str = "command_audit.json";

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Command engine configuration.
    pub engine: EngineConfig,
}

/// Where preferences live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding every preference file.
    pub data_dir: PathBuf,
    /// Allow-list file name.
    pub trusted_file: String,
    /// Command audit file name.
    pub audit_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            trusted_file: TRUSTED_SENDERS_FILE.to_string(),
            audit_file: COMMAND_AUDIT_FILE.to_string(),
        }
    }
}

impl StorageConfig {
    /// Full path of the allow-list file.
    pub fn trusted_path(&self) -> PathBuf {
        self.data_dir.join(&self.trusted_file)
    }

    /// Full path of the audit file.
    pub fn audit_path(&self) -> PathBuf {
        self.data_dir.join(&self.audit_file)
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Engine settings are invalid.
    #[error("invalid engine configuration: {0}")]
    Engine(#[from] EngineConfigError),

    /// Storage settings are invalid.
    #[error("invalid storage configuration: {0}")]
    Storage(String),
}

impl RuntimeConfig {
    /// Load from environment variables.
    ///
    /// - `AB_DATA_DIR`: data directory (default `./data`)
    /// - `AB_SPEAKER_DELAYS_MS`: comma-separated speakerphone delays
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RuntimeConfig::from_env`], reading through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(dir) = lookup("AB_DATA_DIR").filter(|d| !d.trim().is_empty()) {
            config.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup("AB_SPEAKER_DELAYS_MS") {
            let delays = EngineConfig::parse_delays_ms(&raw)?;
            config.engine = config.engine.with_speaker_delays(delays);
        }

        config.validate()?;
        Ok(config)
    }

    /// Override the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage.data_dir = dir.into();
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        if self.storage.trusted_file == self.storage.audit_file {
            return Err(ConfigError::Storage(
                "allow-list and audit must use separate files".to_string(),
            ));
        }
        Ok(())
    }
}
