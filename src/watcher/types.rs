//! Request and result types for confirmation waits.

use std::time::Duration;

use alloy::primitives::TxHash;
use thiserror::Error;

use crate::chain::types::{ChainError, TxReceipt};
use crate::config::schema::{BackoffMode, ConfirmationConfig};
use crate::resilience::{Backoff, RetryPolicy};

/// Errors detected before any network call is issued.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    /// The handle is not a 0x-prefixed 32-byte hex digest.
    #[error("invalid transaction handle '{0}': expected 0x-prefixed 32-byte hex digest")]
    InvalidHandle(String),

    /// A request parameter is out of range.
    #[error("invalid request: {0}")]
    InvalidParameter(&'static str),
}

/// Validated identifier of a submitted transaction.
///
/// Issued by the chain when a transaction is broadcast; immutable once
/// created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHandle(TxHash);

impl TxHandle {
    /// Parse a handle from its canonical string form.
    pub fn parse(s: &str) -> Result<Self, RequestError> {
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| RequestError::InvalidHandle(s.to_string()))?;
        if digits.len() != 64 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(RequestError::InvalidHandle(s.to_string()));
        }
        let hash: TxHash = s
            .parse()
            .map_err(|_| RequestError::InvalidHandle(s.to_string()))?;
        Ok(Self(hash))
    }

    /// The underlying 32-byte digest.
    pub fn hash(&self) -> TxHash {
        self.0
    }
}

impl std::fmt::Display for TxHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One confirmation wait: the handle plus every knob governing the wait.
///
/// All fields are caller-supplied configuration; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    /// Transaction handle as submitted by the caller. Validated (and
    /// rejected without any network call if malformed) when the wait starts.
    pub handle: String,

    /// Confirmations required before the wait resolves. Inclusion itself
    /// counts as the first confirmation.
    pub required_confirmations: u32,

    /// Interval between receipt polls.
    pub poll_interval: Duration,

    /// Wall-clock budget for the whole wait, measured from the first call.
    pub timeout: Duration,

    /// Retries per failed chain query, after the initial attempt.
    pub retry_count: u32,

    /// Base delay between retry attempts.
    pub retry_delay: Duration,

    /// Delay schedule between retry attempts.
    pub backoff: Backoff,
}

impl ConfirmationRequest {
    /// A request with stock defaults: 1 confirmation, 2s polls, 3min
    /// timeout, 5 retries at 2s apart.
    pub fn new(handle: impl Into<String>) -> Self {
        Self::from_config(handle, &ConfirmationConfig::default())
    }

    /// A request taking its defaults from loaded configuration.
    pub fn from_config(handle: impl Into<String>, defaults: &ConfirmationConfig) -> Self {
        let backoff = match defaults.backoff {
            BackoffMode::Fixed => Backoff::Fixed,
            BackoffMode::Exponential => Backoff::Exponential {
                max_delay: Duration::from_millis(defaults.max_retry_delay_ms),
            },
        };
        Self {
            handle: handle.into(),
            required_confirmations: defaults.required_confirmations,
            poll_interval: Duration::from_millis(defaults.poll_interval_ms),
            timeout: Duration::from_millis(defaults.timeout_ms),
            retry_count: defaults.retry_count,
            retry_delay: Duration::from_millis(defaults.retry_delay_ms),
            backoff,
        }
    }

    /// Override the required confirmation depth.
    pub fn with_required_confirmations(mut self, confirmations: u32) -> Self {
        self.required_confirmations = confirmations;
        self
    }

    /// Override the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Override the wall-clock budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check parameters and parse the handle. No network traffic.
    pub(crate) fn validate(&self) -> Result<TxHandle, RequestError> {
        if self.required_confirmations == 0 {
            return Err(RequestError::InvalidParameter(
                "required_confirmations must be at least 1",
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(RequestError::InvalidParameter(
                "poll_interval must be non-zero",
            ));
        }
        if self.timeout.is_zero() {
            return Err(RequestError::InvalidParameter("timeout must be non-zero"));
        }
        TxHandle::parse(&self.handle)
    }

    pub(crate) fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.retry_count,
            delay: self.retry_delay,
            backoff: self.backoff,
        }
    }
}

/// Terminal outcome of a confirmation wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// The transaction executed successfully and reached the required
    /// confirmation depth.
    Confirmed { receipt: TxReceipt },

    /// The transaction was mined but reverted on-chain. The chain's own
    /// rejection signal is passed through; reverts are never retried.
    Reverted { receipt: TxReceipt },

    /// The wall-clock budget elapsed before a settled receipt was observed.
    TimedOut { waited: Duration },

    /// A chain query kept failing until the retry budget was exhausted.
    Failed { attempts: u32, last_error: ChainError },
}

impl ConfirmationStatus {
    /// Whether the transaction settled successfully.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, ConfirmationStatus::Confirmed { .. })
    }

    /// The receipt, if the transaction was mined at all.
    pub fn receipt(&self) -> Option<&TxReceipt> {
        match self {
            ConfirmationStatus::Confirmed { receipt }
            | ConfirmationStatus::Reverted { receipt } => Some(receipt),
            _ => None,
        }
    }

    /// Stable label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            ConfirmationStatus::Confirmed { .. } => "confirmed",
            ConfirmationStatus::Reverted { .. } => "reverted",
            ConfirmationStatus::TimedOut { .. } => "timed_out",
            ConfirmationStatus::Failed { .. } => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HANDLE: &str = "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b";

    #[test]
    fn test_handle_parse_valid() {
        let handle = TxHandle::parse(HANDLE).unwrap();
        assert_eq!(handle.to_string(), HANDLE);
    }

    #[test]
    fn test_handle_parse_rejects_malformed() {
        // Missing prefix
        assert!(TxHandle::parse(&HANDLE[2..]).is_err());
        // Truncated
        assert!(TxHandle::parse("0xabc123").is_err());
        // Non-hex digit
        let mut bad = HANDLE.to_string();
        bad.replace_range(4..5, "z");
        assert!(matches!(
            TxHandle::parse(&bad),
            Err(RequestError::InvalidHandle(_))
        ));
    }

    #[test]
    fn test_request_defaults_match_stock_values() {
        let request = ConfirmationRequest::new(HANDLE);
        assert_eq!(request.required_confirmations, 1);
        assert_eq!(request.poll_interval, Duration::from_millis(2_000));
        assert_eq!(request.timeout, Duration::from_millis(180_000));
        assert_eq!(request.retry_count, 5);
        assert_eq!(request.retry_delay, Duration::from_millis(2_000));
        assert_eq!(request.backoff, Backoff::Fixed);
    }

    #[test]
    fn test_zero_confirmations_rejected() {
        let request = ConfirmationRequest::new(HANDLE).with_required_confirmations(0);
        assert_eq!(
            request.validate(),
            Err(RequestError::InvalidParameter(
                "required_confirmations must be at least 1"
            ))
        );
    }

    #[test]
    fn test_exponential_backoff_from_config() {
        let config = ConfirmationConfig {
            backoff: BackoffMode::Exponential,
            max_retry_delay_ms: 9_000,
            ..ConfirmationConfig::default()
        };
        let request = ConfirmationRequest::from_config(HANDLE, &config);
        assert_eq!(
            request.backoff,
            Backoff::Exponential {
                max_delay: Duration::from_millis(9_000)
            }
        );
    }
}
