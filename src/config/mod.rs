//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! .env.local (local runs only)
//!     → env.rs (snapshot of the settlement variables)
//!     → validation.rs (presence, format, network)
//!     → chain.rs (static chain table, explorer URLs)
//! ```
//!
//! # Design Decisions
//! - Chain metadata is compiled in and immutable
//! - The only runtime override is `RPC_URL`
//! - Validation reports every missing variable, not just the first

pub mod chain;
pub mod env;
pub mod validation;

pub use chain::{
    chain_config, explorer_address_url, explorer_tx_url, ChainConfig, ConfigError, Network,
};
pub use env::SettlementEnv;
pub use validation::{validate, ValidatedInput, ValidationError};
