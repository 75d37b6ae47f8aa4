//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → WatcherConfig (validated, immutable)
//!     → shared by reference with the chain client and watcher
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; waits are one-shot calls, so there
//!   is no reload path
//! - All fields have defaults to allow minimal configs (or none at all)
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ChainConfig;
pub use schema::ConfirmationConfig;
pub use schema::ObservabilityConfig;
pub use schema::WatcherConfig;
