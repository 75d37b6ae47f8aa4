//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Chain query from the watcher:
//!     → retries.rs (execute with retry budget and inter-attempt delay)
//!     → backoff.rs (optional exponential delay growth with jitter)
//!     → On exhausted budget: error returned to the watcher (terminal)
//! ```
//!
//! # Design Decisions
//! - Retries absorb transient errors only; the overall wall-clock deadline
//!   is enforced above this layer and cancels retries mid-flight
//! - Fixed inter-attempt delay is the default; exponential backoff with
//!   jitter is opt-in for operators polling congested endpoints
//! - The budget counts consecutive failures of one query, not polls

pub mod backoff;
pub mod retries;

pub use retries::{with_retries, Backoff, RetryPolicy};
