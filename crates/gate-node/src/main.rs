//! # Gate Node
//!
//! Operator entry point for the infohash admission engine.
//!
//! ## Startup Sequence (`run`)
//!
//! 1. Initialize telemetry from the environment
//! 2. Load configuration (`--config`, JSON)
//! 3. Open the backend and hydrate the approval sets
//! 4. Serve console requests from stdin until EOF or Ctrl-C
//! 5. Stop the persistence writer (drains queued promotions)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

use gate_approval::{AdmissionService, ApprovalHook};
use gate_node::{authority, console, NodeConfig};
use gate_telemetry::{init_telemetry, TelemetryConfig};

/// Infohash admission engine for BitTorrent trackers
#[derive(Parser, Debug)]
#[command(name = "gate-node")]
#[command(about = "Infohash allow/deny admission with signature-based promotion")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the engine against stdin requests
    Run {
        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate an authority key pair
    Keygen,

    /// Sign an infohash with an authority seed
    Sign {
        /// 32-byte hex seed from `keygen`
        #[arg(long)]
        seed: String,

        /// 40-character hex infohash
        #[arg(long)]
        infohash: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Run { config } => run(config).await,
        Command::Keygen => {
            let key = authority::generate_key();
            println!("seed       {}", key.seed_hex);
            println!("public_key {}", key.public_key_hex);
            Ok(())
        }
        Command::Sign { seed, infohash } => {
            println!("{}", authority::sign_infohash(&seed, &infohash)?);
            Ok(())
        }
    }
}

async fn run(config_path: Option<PathBuf>) -> Result<()> {
    let telemetry = init_telemetry(&TelemetryConfig::from_env())
        .context("Failed to initialize telemetry")?;
    let metrics = telemetry.metrics();

    let config = match &config_path {
        Some(path) => NodeConfig::load(path)?,
        None => NodeConfig::default(),
    };
    info!(
        config = ?config_path,
        backend = config.approval.backend.kind(),
        "Starting gate node"
    );

    let service = Arc::new(
        AdmissionService::from_config(&config.approval, Arc::clone(&metrics))
            .context("Failed to start admission service")?,
    );
    let hook = ApprovalHook::new(Arc::clone(&service));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal");
                break;
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if let Some(response) = console::handle_line(&hook, &metrics, &line) {
                        stdout.write_all(response.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    error!(error = %e, "Failed to read stdin");
                    break;
                }
            },
        }
    }

    if let Err(e) = service.shutdown().await {
        error!(error = %e, "Writer shutdown failed");
    }

    if config.dump_metrics_on_exit {
        stdout.write_all(metrics.encode()?.as_bytes()).await?;
        stdout.flush().await?;
    }

    info!("Gate node stopped");
    Ok(())
}
