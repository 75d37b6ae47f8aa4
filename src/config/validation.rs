//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals > 0, timeout covers at least one poll)
//! - Check addresses and filter directives parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WatcherConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::{BackoffMode, WatcherConfig};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &WatcherConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.chain.rpc_url.parse::<url::Url>().is_err() {
        errors.push(ValidationError {
            field: "chain.rpc_url",
            message: format!("'{}' is not a valid URL", config.chain.rpc_url),
        });
    }
    for url in &config.chain.failover_urls {
        if url.parse::<url::Url>().is_err() {
            errors.push(ValidationError {
                field: "chain.failover_urls",
                message: format!("'{}' is not a valid URL", url),
            });
        }
    }
    if config.chain.chain_id == 0 {
        errors.push(ValidationError {
            field: "chain.chain_id",
            message: "chain ID must be non-zero".to_string(),
        });
    }
    if config.chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "chain.rpc_timeout_secs",
            message: "RPC timeout must be non-zero".to_string(),
        });
    }

    let confirmation = &config.confirmation;
    if confirmation.required_confirmations == 0 {
        errors.push(ValidationError {
            field: "confirmation.required_confirmations",
            message: "at least one confirmation is required".to_string(),
        });
    }
    if confirmation.poll_interval_ms == 0 {
        errors.push(ValidationError {
            field: "confirmation.poll_interval_ms",
            message: "poll interval must be non-zero".to_string(),
        });
    }
    if confirmation.timeout_ms < confirmation.poll_interval_ms {
        errors.push(ValidationError {
            field: "confirmation.timeout_ms",
            message: "timeout must cover at least one poll interval".to_string(),
        });
    }
    if confirmation.backoff == BackoffMode::Exponential
        && confirmation.max_retry_delay_ms < confirmation.retry_delay_ms
    {
        errors.push(ValidationError {
            field: "confirmation.max_retry_delay_ms",
            message: "delay cap must be at least the base retry delay".to_string(),
        });
    }

    let observability = &config.observability;
    if tracing_subscriber::EnvFilter::try_new(&observability.log_level).is_err() {
        errors.push(ValidationError {
            field: "observability.log_level",
            message: format!("'{}' is not a valid filter directive", observability.log_level),
        });
    }
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address",
            message: format!(
                "'{}' is not a valid socket address",
                observability.metrics_address
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&WatcherConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = WatcherConfig::default();
        config.chain.rpc_url = "not a url".to_string();
        config.chain.chain_id = 0;
        config.confirmation.required_confirmations = 0;
        config.confirmation.poll_interval_ms = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.field == "chain.rpc_url"));
        assert!(errors
            .iter()
            .any(|e| e.field == "confirmation.required_confirmations"));
    }

    #[test]
    fn test_timeout_must_cover_one_poll() {
        let mut config = WatcherConfig::default();
        config.confirmation.poll_interval_ms = 5_000;
        config.confirmation.timeout_ms = 1_000;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "confirmation.timeout_ms");
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = WatcherConfig::default();
        config.observability.metrics_address = "nope".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
