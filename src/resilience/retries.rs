//! Retry execution with a bounded budget.
//!
//! # Responsibilities
//! - Execute an async operation, absorbing transient failures
//! - Enforce the retry budget (max retries per query)
//! - Delay between attempts (fixed or exponential with jitter)
//!
//! # Design Decisions
//! - The caller decides what is retryable by what it returns as `Err`
//! - The budget is consecutive: one success resets nothing because the
//!   combinator runs a single logical query
//! - Delays suspend cooperatively; an enclosing deadline can cancel them

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::resilience::backoff::calculate_backoff;

/// Delay schedule between retry attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay before every retry.
    Fixed,
    /// Exponentially growing, jittered delay capped at `max_delay`.
    Exponential { max_delay: Duration },
}

/// Budget and pacing for retrying a single query.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Number of retries after the initial attempt.
    pub max_retries: u32,
    /// Base delay between attempts.
    pub delay: Duration,
    /// How the delay evolves across attempts.
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// Fixed-delay policy.
    pub fn fixed(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            delay,
            backoff: Backoff::Fixed,
        }
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.delay,
            Backoff::Exponential { max_delay } => calculate_backoff(
                attempt,
                self.delay.as_millis() as u64,
                max_delay.as_millis() as u64,
            ),
        }
    }
}

/// Run `op`, retrying failures according to `policy`.
///
/// Returns the first success, or the last error once the budget is
/// exhausted.
pub async fn with_retries<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < policy.max_retries => {
                attempt += 1;
                let delay = policy.delay_for(attempt);
                tracing::debug!(
                    attempt = attempt,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Retrying after transient failure"
                );
                sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
