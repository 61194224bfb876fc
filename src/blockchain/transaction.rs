//! Mint call construction and submission.
//!
//! # Responsibilities
//! - Encode the score token's `mint(address,uint256)` call
//! - Send it through the wallet-filled provider and wait for the receipt
//!
//! Nonce, gas and fees come from the provider's default fillers. There is no
//! retry: a failed send or receipt is returned as-is.

use std::future::Future;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult};

sol! {
    /// Score token minting entry point.
    interface IScoreToken {
        function mint(address to, uint256 amount) external;
    }
}

/// Call descriptor for one mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintCall {
    /// Token contract to call.
    pub contract: Address,
    pub recipient: Address,
    pub amount: U256,
}

impl MintCall {
    pub fn new(contract: Address, recipient: Address, amount: U256) -> Self {
        Self {
            contract,
            recipient,
            amount,
        }
    }

    /// ABI-encoded call data.
    pub fn calldata(&self) -> Bytes {
        IScoreToken::mintCall {
            to: self.recipient,
            amount: self.amount,
        }
        .abi_encode()
        .into()
    }

    /// Unsigned transaction; the provider fills nonce, gas and chain ID.
    pub fn to_request(&self) -> TransactionRequest {
        TransactionRequest::default()
            .with_to(self.contract)
            .with_input(self.calldata())
    }
}

/// Submits a mint and waits until it is accepted.
pub trait MintSubmitter {
    /// Send `call` once and return its hash after the receipt arrives.
    fn submit_mint(&self, call: &MintCall) -> impl Future<Output = BlockchainResult<TxHash>> + Send;
}

/// [`MintSubmitter`] backed by a live RPC endpoint.
#[derive(Debug, Clone)]
pub struct ContractSubmitter {
    client: BlockchainClient,
}

impl ContractSubmitter {
    pub fn new(client: BlockchainClient) -> Self {
        Self { client }
    }
}

impl MintSubmitter for ContractSubmitter {
    async fn submit_mint(&self, call: &MintCall) -> BlockchainResult<TxHash> {
        let tx = call.to_request().with_from(self.client.sender());

        let pending = self
            .client
            .provider()
            .send_transaction(tx)
            .await
            .map_err(BlockchainError::Submission)?;

        tracing::info!(tx_hash = %pending.tx_hash(), "Transaction sent, waiting for receipt");

        let receipt = pending
            .get_receipt()
            .await
            .map_err(BlockchainError::Confirmation)?;

        if !receipt.status() {
            return Err(BlockchainError::Reverted(receipt.transaction_hash.to_string()));
        }

        tracing::debug!(
            tx_hash = %receipt.transaction_hash,
            block_number = ?receipt.block_number,
            gas_used = receipt.gas_used,
            "Receipt received"
        );

        Ok(receipt.transaction_hash)
    }
}
