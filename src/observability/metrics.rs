//! Metrics collection and exposition.
//!
//! # Metrics
//! - `watcher_polls_total` (counter): receipt polls by result
//!   (`pending`, `mined`, `error`)
//! - `watcher_retries_total` (counter): transient-failure retries
//! - `watcher_outcomes_total` (counter): terminal wait outcomes by status
//! - `watcher_wait_seconds` (histogram): wall-clock wait duration by status
//! - `chain_rpc_health` (gauge): 1=reachable, 0=unreachable
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade and is a no-op until an
//!   exporter is installed, so the library never forces an endpoint on
//!   its callers

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exposition endpoint.
///
/// Failures are logged, not fatal: the watcher keeps working without
/// metrics exposition.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record one receipt poll and its result.
pub fn record_poll(result: &'static str) {
    counter!("watcher_polls_total", "result" => result).increment(1);
}

/// Record retries spent absorbing transient failures.
pub fn record_retries(count: u64) {
    counter!("watcher_retries_total").increment(count);
}

/// Record the terminal outcome of a wait.
pub fn record_outcome(status: &'static str, waited: Duration) {
    counter!("watcher_outcomes_total", "status" => status).increment(1);
    histogram!("watcher_wait_seconds", "status" => status).record(waited.as_secs_f64());
}

/// Record chain RPC reachability.
pub fn record_chain_health(healthy: bool) {
    gauge!("chain_rpc_health").set(if healthy { 1.0 } else { 0.0 });
}
