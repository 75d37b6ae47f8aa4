//! Shared utilities for the confirmation flow tests.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use alloy::primitives::TxHash;
use tx_watcher::chain::types::{ChainResult, ExecutionStatus, TxReceipt};
use tx_watcher::chain::ChainReader;

/// A well-formed transaction handle used across the flow tests.
pub const HANDLE: &str = "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b";

/// A second well-formed handle for concurrent waits.
pub const OTHER_HANDLE: &str =
    "0x4a3b1fced2b4f0e5a0d4a15902ba0e61b5b6d3a3a3f1c2d4e5f60718293a4b5c";

/// One scripted answer to a receipt query.
pub type ReceiptStep = ChainResult<Option<TxReceipt>>;

/// Chain that answers receipt queries from a script.
///
/// Once the script is exhausted the final step repeats forever, so a chain
/// scripted to confirm stays confirmed. Head queries return the current
/// head and then advance it by a configurable number of blocks.
pub struct ScriptedChain {
    steps: Vec<ReceiptStep>,
    cursor: AtomicUsize,
    head: AtomicU64,
    blocks_per_query: u64,
    receipt_queries: AtomicU64,
}

impl ScriptedChain {
    pub fn new(steps: Vec<ReceiptStep>, head: u64) -> Self {
        assert!(!steps.is_empty(), "script needs at least one step");
        Self {
            steps,
            cursor: AtomicUsize::new(0),
            head: AtomicU64::new(head),
            blocks_per_query: 0,
            receipt_queries: AtomicU64::new(0),
        }
    }

    /// Advance the head by `blocks` after every head query.
    pub fn with_advancing_head(mut self, blocks: u64) -> Self {
        self.blocks_per_query = blocks;
        self
    }

    /// How many receipt queries the chain has served.
    pub fn receipt_queries(&self) -> u64 {
        self.receipt_queries.load(Ordering::SeqCst)
    }
}

impl ChainReader for ScriptedChain {
    async fn transaction_receipt(&self, _tx_hash: TxHash) -> ChainResult<Option<TxReceipt>> {
        self.receipt_queries.fetch_add(1, Ordering::SeqCst);
        let step = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.steps[step.min(self.steps.len() - 1)].clone()
    }

    async fn block_number(&self) -> ChainResult<u64> {
        Ok(self.head.fetch_add(self.blocks_per_query, Ordering::SeqCst))
    }
}

pub fn success_receipt(block_number: u64) -> TxReceipt {
    TxReceipt {
        tx_hash: HANDLE.parse().unwrap(),
        status: ExecutionStatus::Succeeded,
        block_number,
        gas_used: 21_000,
        logs: Vec::new(),
    }
}

pub fn revert_receipt(block_number: u64) -> TxReceipt {
    TxReceipt {
        tx_hash: HANDLE.parse().unwrap(),
        status: ExecutionStatus::Reverted,
        block_number,
        gas_used: 32_500,
        logs: Vec::new(),
    }
}
