//! Score settlement for CI pipelines.
//!
//! Reads the settlement request from the environment, mints score tokens to
//! the recipient with one transaction, and reports the transaction hash and
//! explorer link back to the pipeline.

pub mod blockchain;
pub mod config;
pub mod observability;
pub mod settlement;

pub use config::{ChainConfig, Network, SettlementEnv};
pub use settlement::{CiOutput, SettlementError, SettlementRequest, SettlementResult};
