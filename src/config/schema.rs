//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the watcher.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the transaction watcher.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WatcherConfig {
    /// Chain RPC settings.
    pub chain: ChainConfig,

    /// Confirmation polling defaults.
    pub confirmation: ConfirmationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Chain RPC configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    #[serde(default)]
    pub failover_urls: Vec<String>,

    /// Chain ID (e.g., 1 for Ethereum mainnet, 31337 for local Anvil).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            chain_id: 1,
            rpc_timeout_secs: 10,
        }
    }
}

/// Delay schedule between retries of a failed chain query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffMode {
    /// Constant delay between attempts.
    Fixed,
    /// Exponentially growing, jittered delay.
    Exponential,
}

/// Default knobs for confirmation waits.
///
/// Every field can be overridden per request; these are the values a request
/// starts from. Nothing here is a compiled-in constant.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    /// Number of confirmations required for a transaction to count as
    /// settled. Inclusion itself is the first confirmation.
    pub required_confirmations: u32,

    /// Interval between receipt polls in milliseconds.
    pub poll_interval_ms: u64,

    /// Overall wall-clock budget for one wait in milliseconds.
    pub timeout_ms: u64,

    /// Retries per failed chain query, after the initial attempt.
    pub retry_count: u32,

    /// Delay between retry attempts in milliseconds.
    pub retry_delay_ms: u64,

    /// Delay schedule between retries.
    pub backoff: BackoffMode,

    /// Delay cap in milliseconds when `backoff = "exponential"`.
    pub max_retry_delay_ms: u64,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            required_confirmations: 1,
            poll_interval_ms: 2_000,
            timeout_ms: 180_000,
            retry_count: 5,
            retry_delay_ms: 2_000,
            backoff: BackoffMode::Fixed,
            max_retry_delay_ms: 30_000,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output for development.
    Pretty,
    /// Structured JSON for production log aggregation.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
