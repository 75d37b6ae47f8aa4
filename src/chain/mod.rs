//! Chain access subsystem.
//!
//! # Data Flow
//! ```text
//! Configuration ([chain] section: RPC URLs, chain ID, timeouts)
//!     → rpc.rs (provider construction, failover, per-call timeouts)
//!     → types.rs (crate-owned receipt model, error taxonomy)
//!     → reader.rs (capability trait consumed by the watcher)
//! ```
//!
//! # Design Decisions
//! - The watcher never sees a concrete RPC client, only `ChainReader`
//! - All RPC calls have configurable timeouts
//! - A receipt without a block number is reported as still pending
//! - Graceful degradation when the chain is unreachable at startup

pub mod reader;
pub mod rpc;
pub mod types;

pub use reader::ChainReader;
pub use rpc::RpcChainClient;
pub use types::{ChainConfig, ChainError, ChainId, ChainResult, TxReceipt};
