//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! SERVER_WALLET + THIRDWEB_SECRET_KEY
//!     → wallet.rs (key loading)
//!     → client.rs (authenticated RPC provider, chain ID probe)
//!     → transaction.rs (mint call, send, receipt)
//! ```
//!
//! # Security Constraints
//! - Private key ONLY from the environment
//! - Never log private keys or the provider secret

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use transaction::{ContractSubmitter, MintCall, MintSubmitter};
pub use types::{BlockchainError, BlockchainResult, ChainId};
pub use wallet::Wallet;
