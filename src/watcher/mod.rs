//! Confirmation watcher subsystem.
//!
//! # Data Flow
//! ```text
//! ConfirmationRequest (handle + per-call knobs)
//!     → types.rs (handle validation, parameter validation)
//!     → waiter.rs (poll loop over a ChainReader)
//!     → ConfirmationStatus (terminal, returned to the caller)
//! ```
//!
//! # State Machine
//! ```text
//! Pending → Polling → {Confirmed | Reverted | TimedOut | Failed}
//! ```
//! `Pending` is entered on call, before any network traffic; `Polling` loops
//! until one terminal state is reached; every terminal state ends the call.
//!
//! # Design Decisions
//! - Read-only: the watcher issues queries, never transactions
//! - The wall-clock deadline wraps the whole poll loop and cancels
//!   in-flight retries when it elapses
//! - Revert is terminal immediately; retrying cannot change an on-chain
//!   revert
//! - One logical operation per call; many waits can share a runtime

pub mod types;
pub mod waiter;

pub use types::{ConfirmationRequest, ConfirmationStatus, RequestError, TxHandle};
pub use waiter::ConfirmationWaiter;
