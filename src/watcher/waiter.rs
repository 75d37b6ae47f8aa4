//! Confirmation polling over a `ChainReader`.
//!
//! # Responsibilities
//! - Validate the request before any network traffic
//! - Poll for the receipt at the configured interval
//! - Absorb transient query failures up to the retry budget
//! - Enforce the overall wall-clock deadline
//! - Classify the terminal outcome for the caller

use std::cell::Cell;

use alloy::primitives::TxHash;
use tokio::time::{interval, timeout, Instant, MissedTickBehavior};

use crate::chain::reader::ChainReader;
use crate::chain::types::ChainResult;
use crate::observability::metrics;
use crate::resilience::{with_retries, RetryPolicy};
use crate::watcher::types::{ConfirmationRequest, ConfirmationStatus, RequestError};

/// Watches submitted transactions until they settle.
///
/// Holds no state between calls; a single waiter can serve any number of
/// concurrent waits.
#[derive(Debug, Clone)]
pub struct ConfirmationWaiter<C> {
    chain: C,
}

impl<C: ChainReader> ConfirmationWaiter<C> {
    /// Create a waiter over a chain backend.
    pub fn new(chain: C) -> Self {
        Self { chain }
    }

    /// Wait until the transaction settles or the wait terminates.
    ///
    /// # Returns
    /// `Err` only for a malformed request (bad handle, nonsensical
    /// parameters), detected before any network call. Every chain-side
    /// outcome is a [`ConfirmationStatus`].
    pub async fn wait_for_confirmation(
        &self,
        request: &ConfirmationRequest,
    ) -> Result<ConfirmationStatus, RequestError> {
        let handle = request.validate()?;
        let started = Instant::now();

        tracing::debug!(
            tx_hash = %handle,
            required = request.required_confirmations,
            timeout_ms = request.timeout.as_millis() as u64,
            "Waiting for confirmation"
        );

        let status = match timeout(
            request.timeout,
            self.poll_until_settled(handle.hash(), request),
        )
        .await
        {
            Ok(status) => status,
            Err(_) => ConfirmationStatus::TimedOut {
                waited: started.elapsed(),
            },
        };

        let waited = started.elapsed();
        metrics::record_outcome(status.label(), waited);

        match &status {
            ConfirmationStatus::Confirmed { receipt } => {
                tracing::info!(
                    tx_hash = %handle,
                    block_number = receipt.block_number,
                    waited_ms = waited.as_millis() as u64,
                    "Transaction confirmed"
                );
            }
            ConfirmationStatus::Reverted { receipt } => {
                tracing::warn!(
                    tx_hash = %handle,
                    block_number = receipt.block_number,
                    "Transaction reverted on-chain"
                );
            }
            ConfirmationStatus::TimedOut { waited } => {
                tracing::warn!(
                    tx_hash = %handle,
                    waited_ms = waited.as_millis() as u64,
                    "Confirmation wait timed out"
                );
            }
            ConfirmationStatus::Failed {
                attempts,
                last_error,
            } => {
                tracing::warn!(
                    tx_hash = %handle,
                    attempts = attempts,
                    error = %last_error,
                    "Chain queries exhausted retry budget"
                );
            }
        }

        Ok(status)
    }

    async fn poll_until_settled(
        &self,
        tx_hash: TxHash,
        request: &ConfirmationRequest,
    ) -> ConfirmationStatus {
        let policy = request.retry_policy();
        let chain = &self.chain;

        let mut ticker = interval(request.poll_interval);
        // A long retry sequence must not be followed by a burst of
        // catch-up polls
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let lookup =
                query_with_budget(&policy, move || chain.transaction_receipt(tx_hash)).await;
            let receipt = match lookup {
                Ok(receipt) => receipt,
                Err((attempts, last_error)) => {
                    metrics::record_poll("error");
                    return ConfirmationStatus::Failed {
                        attempts,
                        last_error,
                    };
                }
            };

            let Some(receipt) = receipt else {
                metrics::record_poll("pending");
                tracing::trace!(tx_hash = %tx_hash, "Transaction pending");
                continue;
            };
            metrics::record_poll("mined");

            if receipt.reverted() {
                return ConfirmationStatus::Reverted { receipt };
            }

            let head = match query_with_budget(&policy, move || chain.block_number()).await {
                Ok(head) => head,
                Err((attempts, last_error)) => {
                    return ConfirmationStatus::Failed {
                        attempts,
                        last_error,
                    };
                }
            };

            // Inclusion counts as the first confirmation
            let confirmations = head.saturating_sub(receipt.block_number).saturating_add(1);
            if confirmations >= u64::from(request.required_confirmations) {
                return ConfirmationStatus::Confirmed { receipt };
            }

            tracing::debug!(
                tx_hash = %tx_hash,
                confirmations = confirmations,
                required = request.required_confirmations,
                "Waiting for confirmations"
            );
        }
    }
}

/// Run one chain query under the retry budget, reporting how many attempts
/// were spent when the budget runs out.
async fn query_with_budget<T, F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
) -> Result<T, (u32, crate::chain::types::ChainError)>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = ChainResult<T>>,
{
    let attempts = Cell::new(0u32);
    let result = with_retries(policy, || {
        attempts.set(attempts.get() + 1);
        op()
    })
    .await;

    let spent = attempts.get();
    if spent > 1 {
        metrics::record_retries(u64::from(spent - 1));
    }

    result.map_err(|e| (spent, e))
}
