//! Settlement request, credentials and result types.

use alloy::primitives::{Address, U256};
use serde::Serialize;
use thiserror::Error;

use crate::blockchain::types::BlockchainError;
use crate::config::chain::{ConfigError, Network};
use crate::config::validation::ValidationError;

/// A validated mint request. Never mutated after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettlementRequest {
    /// Wallet receiving the minted score tokens.
    pub recipient: Address,
    /// Raw token amount passed to `mint` (no decimal scaling).
    pub amount: U256,
    pub network: Network,
    pub issue_number: String,
    pub repo_name: String,
    /// Score token contract exposing `mint(address,uint256)`.
    pub token_contract: Address,
}

/// Secrets needed to talk to the chain.
#[derive(Clone)]
pub struct Credentials {
    secret_key: String,
    server_wallet_key: String,
}

impl Credentials {
    pub fn new(secret_key: impl Into<String>, server_wallet_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            server_wallet_key: server_wallet_key.into(),
        }
    }

    /// Key sent to the RPC provider.
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Hex private key of the minting wallet.
    pub fn server_wallet_key(&self) -> &str {
        &self.server_wallet_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("secret_key", &"<redacted>")
            .field("server_wallet_key", &"<redacted>")
            .finish()
    }
}

/// Outcome of a successful settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettlementResult {
    pub tx_hash: String,
    pub explorer_url: String,
}

/// Any failure that ends a settlement run.
#[derive(Debug, Error)]
pub enum SettlementError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    /// The CI output file could not be written.
    #[error("Failed to write CI output: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type for settlement operations.
pub type SettlementOutcome<T> = Result<T, SettlementError>;
