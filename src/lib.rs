//! Transaction settlement watcher library.
//!
//! Polls a chain RPC endpoint until a submitted transaction is included and
//! has accumulated the required confirmations, or the wait times out /
//! exhausts its retry budget.

pub mod chain;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod watcher;

pub use chain::{ChainReader, RpcChainClient};
pub use config::WatcherConfig;
pub use lifecycle::ShutdownSignal;
pub use watcher::{ConfirmationRequest, ConfirmationStatus, ConfirmationWaiter};
