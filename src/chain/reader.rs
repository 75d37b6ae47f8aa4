//! Capability interface over chain state.
//!
//! The confirmation watcher depends on this trait rather than on a concrete
//! RPC client, so it can be exercised against scripted chains in tests and
//! alternate backends can be substituted without touching the polling logic.

use alloy::primitives::TxHash;

use crate::chain::types::{ChainResult, TxReceipt};

/// Read-only view of chain state needed to confirm a transaction.
#[allow(async_fn_in_trait)]
pub trait ChainReader {
    /// Look up the receipt for a transaction.
    ///
    /// # Returns
    /// `Ok(Some(receipt))` once the transaction is included in a block,
    /// `Ok(None)` while it is still pending, `Err` on a transient query
    /// failure.
    async fn transaction_receipt(&self, tx_hash: TxHash) -> ChainResult<Option<TxReceipt>>;

    /// Get the current chain head block number.
    async fn block_number(&self) -> ChainResult<u64>;
}

impl<C: ChainReader + Sync> ChainReader for &C {
    async fn transaction_receipt(&self, tx_hash: TxHash) -> ChainResult<Option<TxReceipt>> {
        (**self).transaction_receipt(tx_hash).await
    }

    async fn block_number(&self) -> ChainResult<u64> {
        (**self).block_number().await
    }
}
