//! tx-watcher
//!
//! Settlement watcher for submitted transactions: polls the chain until
//! each transaction is confirmed to the required depth, or reports why it
//! is not.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────┐
//!                      │                  TX WATCHER                    │
//!                      │                                                │
//!   tx hashes          │  ┌─────────┐    ┌─────────┐    ┌───────────┐  │
//!   ──────────────────▶│  │ config  │───▶│ watcher │───▶│   chain   │──┼──▶ RPC endpoint(s)
//!                      │  │ loader  │    │  (poll) │    │  client   │  │
//!                      │  └─────────┘    └────┬────┘    └───────────┘  │
//!                      │                      │                        │
//!   terminal status    │                      ▼                        │
//!   ◀──────────────────┼── {confirmed | reverted | timed_out | failed} │
//!                      │                                                │
//!                      │  ┌──────────────────────────────────────────┐ │
//!                      │  │          Cross-Cutting Concerns           │ │
//!                      │  │  resilience (retry/backoff)  lifecycle    │ │
//!                      │  │  observability (logs/metrics)             │ │
//!                      │  └──────────────────────────────────────────┘ │
//!                      └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use futures_util::future::join_all;

use tx_watcher::chain::RpcChainClient;
use tx_watcher::config::{loader, WatcherConfig};
use tx_watcher::lifecycle::{signals, ShutdownSignal};
use tx_watcher::observability::{logging, metrics};
use tx_watcher::watcher::{ConfirmationRequest, ConfirmationStatus, ConfirmationWaiter};

#[derive(Parser)]
#[command(name = "tx-watcher")]
#[command(about = "Wait for submitted transactions to settle on-chain", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wait for one or more transactions to reach the required depth
    Wait {
        /// Transaction hashes (0x-prefixed 32-byte digests)
        #[arg(required = true)]
        hashes: Vec<String>,

        /// Override the configured confirmation depth
        #[arg(long)]
        confirmations: Option<u32>,

        /// Override the configured wall-clock budget in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Emit machine-readable JSON instead of plain lines
        #[arg(long)]
        json: bool,
    },
    /// Probe chain RPC reachability
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match loader::load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("tx-watcher: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => WatcherConfig::default(),
    };

    logging::init_logging(&config.observability);

    tracing::info!(
        rpc_url = %config.chain.rpc_url,
        chain_id = config.chain.chain_id,
        required_confirmations = config.confirmation.required_confirmations,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let client = match RpcChainClient::new(config.chain.clone()).await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize chain client");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Health => {
            if client.is_healthy().await {
                println!("ok");
                ExitCode::SUCCESS
            } else {
                println!("unreachable");
                ExitCode::FAILURE
            }
        }
        Commands::Wait {
            hashes,
            confirmations,
            timeout_secs,
            json,
        } => {
            let requests: Vec<ConfirmationRequest> = hashes
                .iter()
                .map(|hash| {
                    let mut request = ConfirmationRequest::from_config(hash, &config.confirmation);
                    if let Some(depth) = confirmations {
                        request = request.with_required_confirmations(depth);
                    }
                    if let Some(secs) = timeout_secs {
                        request = request.with_timeout(Duration::from_secs(secs));
                    }
                    request
                })
                .collect();

            run_waits(client, requests, json).await
        }
    }
}

/// Run every wait concurrently on this runtime; abort cleanly on a signal.
async fn run_waits(
    client: RpcChainClient,
    requests: Vec<ConfirmationRequest>,
    json: bool,
) -> ExitCode {
    let shutdown = ShutdownSignal::new();
    let mut cancel = shutdown.handle();
    tokio::spawn(async move { signals::handle_signals(&shutdown).await });

    let waiter = ConfirmationWaiter::new(client);
    let waits = join_all(
        requests
            .iter()
            .map(|request| waiter.wait_for_confirmation(request)),
    );

    let results = tokio::select! {
        results = waits => results,
        _ = cancel.cancelled() => {
            tracing::warn!("Shutdown requested, aborting in-flight waits");
            return ExitCode::FAILURE;
        }
    };

    let mut all_confirmed = true;
    for (request, result) in requests.iter().zip(results) {
        match result {
            Ok(status) => {
                if !status.is_confirmed() {
                    all_confirmed = false;
                }
                if json {
                    let rendered = serde_json::json!({
                        "handle": request.handle,
                        "status": status.label(),
                        "receipt": status.receipt(),
                    });
                    println!("{:#}", rendered);
                } else {
                    println!("{} {}", request.handle, describe(&status));
                }
            }
            Err(e) => {
                all_confirmed = false;
                eprintln!("{}: {}", request.handle, e);
            }
        }
    }

    if all_confirmed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn describe(status: &ConfirmationStatus) -> String {
    match status {
        ConfirmationStatus::Confirmed { receipt } => {
            format!("confirmed in block {}", receipt.block_number)
        }
        ConfirmationStatus::Reverted { receipt } => {
            format!("reverted in block {}", receipt.block_number)
        }
        ConfirmationStatus::TimedOut { waited } => {
            format!("timed out after {} ms", waited.as_millis())
        }
        ConfirmationStatus::Failed {
            attempts,
            last_error,
        } => {
            format!("failed after {} attempts: {}", attempts, last_error)
        }
    }
}
