//! Command-line interface.

use ab_01_trusted_senders::{PreferenceStore, TrustedSenderApi};
use ab_03_inbound_router::CommandAuditStore;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Androbot: remote device control for trusted senders
#[derive(Parser, Debug)]
#[command(name = "androbot")]
#[command(version, about = "Remote device control over inbound text messages")]
pub struct Cli {
    /// Data directory (overrides AB_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Manage the trusted sender list
    Trusted {
        /// Action to apply
        #[command(subcommand)]
        action: TrustedAction,
    },
    /// Route JSON-line messages from stdin against the simulated device
    Run,
    /// Print the last recorded device command
    Audit,
    /// Route stdin like `run`, then print Prometheus metrics instead of outcomes
    Metrics,
}

/// `androbot trusted ...`
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum TrustedAction {
    /// Add a number to the allow-list
    Add {
        /// Number in any common format
        number: String,
    },
    /// Remove a number from the allow-list
    Remove {
        /// Number in any common format
        number: String,
    },
    /// Print the allow-list
    List,
}

/// Apply a management action and return the text to print.
pub fn trusted(policy: &dyn TrustedSenderApi, action: &TrustedAction) -> Result<String> {
    let text = match action {
        TrustedAction::Add { number } => {
            if policy.add_trusted_sender(number)? {
                format!("added {}", number)
            } else {
                format!("unchanged: {} is blank or already trusted", number)
            }
        }
        TrustedAction::Remove { number } => {
            if policy.remove_trusted_sender(number)? {
                format!("removed {}", number)
            } else {
                format!("unchanged: {} is not trusted", number)
            }
        }
        TrustedAction::List => {
            let senders = policy.trusted_senders()?;
            if senders.is_empty() {
                "no trusted senders".to_string()
            } else {
                senders
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
    };
    Ok(text)
}

/// Render the last audit record as pretty JSON.
pub fn audit<S: PreferenceStore>(audit: &CommandAuditStore<S>) -> Result<String> {
    Ok(match audit.last()? {
        Some(record) => serde_json::to_string_pretty(&record)?,
        None => "no command recorded".to_string(),
    })
}
