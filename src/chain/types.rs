//! Chain-specific types and error definitions.

use alloy::primitives::{Address, Bytes, TxHash, B256};
use serde::Serialize;
use thiserror::Error;

// Re-export ChainConfig from config module to avoid duplication
pub use crate::config::schema::ChainConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during chain access.
///
/// Everything here is transient from the watcher's point of view: the query
/// can be retried. Terminal outcomes (revert, timeout of the overall wait)
/// are expressed by the watcher, not by this layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Chain client not initialized or disabled.
    #[error("Chain not available: {0}")]
    NotAvailable(String),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Execution outcome recorded in a mined receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    /// The transaction executed successfully.
    Succeeded,
    /// The transaction was mined but reverted.
    Reverted,
}

/// A log record emitted during transaction execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventLog {
    /// Contract that emitted the log.
    pub address: Address,
    /// Indexed topics.
    pub topics: Vec<B256>,
    /// Unindexed data payload.
    pub data: Bytes,
}

/// The chain's record of a mined transaction's execution outcome.
///
/// Only ever constructed for transactions that are included in a block;
/// "not yet included" is `Option::None` at the [`crate::chain::ChainReader`]
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxReceipt {
    /// Hash of the transaction this receipt belongs to.
    pub tx_hash: TxHash,
    /// Success or revert.
    pub status: ExecutionStatus,
    /// Block the transaction was included in.
    pub block_number: u64,
    /// Gas consumed by the transaction.
    pub gas_used: u64,
    /// Emitted log records.
    pub logs: Vec<EventLog>,
}

impl TxReceipt {
    /// Whether the transaction reverted on-chain.
    pub fn reverted(&self) -> bool {
        self.status == ExecutionStatus::Reverted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(1u64);
        assert_eq!(chain_id.0, 1);
        assert_eq!(u64::from(chain_id), 1);
    }

    #[test]
    fn test_default_config() {
        let config = ChainConfig::default();
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.rpc_timeout_secs, 10);
        assert!(config.failover_urls.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = ChainError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");

        let err = ChainError::ChainMismatch {
            expected: 1,
            actual: 11155111,
        };
        assert!(err.to_string().contains("11155111"));
    }

    #[test]
    fn test_receipt_reverted() {
        let receipt = TxReceipt {
            tx_hash: TxHash::ZERO,
            status: ExecutionStatus::Reverted,
            block_number: 100,
            gas_used: 21_000,
            logs: Vec::new(),
        };
        assert!(receipt.reverted());
    }
}
