//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging/metrics → Start waits
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Abort in-flight waits → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Waits are read-only, so aborting them needs no rollback
//! - Shutdown is observable after the fact: a handle taken late still
//!   sees an earlier trigger

pub mod shutdown;
pub mod signals;

pub use shutdown::{ShutdownHandle, ShutdownSignal};
