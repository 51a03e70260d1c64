//! `androbot` binary.
//!
//! ## Startup Sequence
//!
//! 1. Parse arguments
//! 2. Initialize logging and metrics
//! 3. Load configuration (env, then `--data-dir`)
//! 4. Open preference files (allow-list migration runs here)
//! 5. Dispatch the subcommand

use std::sync::Arc;
use std::time::Duration;

use androbot_runtime::adapters::SimulatedAudio;
use androbot_runtime::cli::{self, Cli, Commands};
use androbot_runtime::{run_messages, RuntimeConfig, SubsystemContainer};
use androbot_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};
use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;

/// Extra wait after the last speakerphone delay before exiting.
const SPEAKER_GRACE_MARGIN: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    init_telemetry(TelemetryConfig::from_env()).context("initializing telemetry")?;

    let mut config = RuntimeConfig::from_env().context("loading configuration")?;
    if let Some(dir) = args.data_dir {
        config = config.with_data_dir(dir);
    }
    let container = SubsystemContainer::open(config)?;

    match args.command {
        Commands::Trusted { action } => {
            println!("{}", cli::trusted(container.policy.as_ref(), &action)?);
        }
        Commands::Audit => {
            println!("{}", cli::audit(container.audit.as_ref())?);
        }
        Commands::Run => {
            route_stdin(&container, tokio::io::stdout()).await?;
        }
        Commands::Metrics => {
            route_stdin(&container, tokio::io::sink()).await?;
            print!("{}", encode_metrics()?);
        }
    }
    Ok(())
}

async fn route_stdin<W>(container: &SubsystemContainer, output: W) -> Result<()>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    let router = Arc::new(container.router(Arc::new(SimulatedAudio::new()))?);
    let grace = container
        .config
        .engine
        .speaker_delays
        .iter()
        .max()
        .copied()
        .unwrap_or_default()
        + SPEAKER_GRACE_MARGIN;

    info!("Reading messages from stdin");
    let summary = run_messages(router, BufReader::new(tokio::io::stdin()), output, grace).await?;
    info!("Run complete: {:?}", summary);
    Ok(())
}
