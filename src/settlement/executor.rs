//! Settlement executor: one mint per request.

use crate::blockchain::transaction::{MintCall, MintSubmitter};
use crate::settlement::types::{SettlementOutcome, SettlementRequest, SettlementResult};

/// Runs a single settlement against a [`MintSubmitter`].
#[derive(Debug, Clone)]
pub struct SettlementExecutor<S> {
    submitter: S,
}

impl<S: MintSubmitter> SettlementExecutor<S> {
    pub fn new(submitter: S) -> Self {
        Self { submitter }
    }

    /// Mint `request.amount` tokens to `request.recipient`.
    ///
    /// Exactly one submission is attempted. Errors from the submitter are
    /// returned unchanged.
    pub async fn execute(
        &self,
        request: &SettlementRequest,
    ) -> SettlementOutcome<SettlementResult> {
        let chain = request.network.chain();
        let call = MintCall::new(request.token_contract, request.recipient, request.amount);

        tracing::info!(
            contract = %call.contract,
            recipient = %call.recipient,
            amount = %call.amount,
            "Preparing mint transaction"
        );
        tracing::debug!(recipient_url = %chain.address_url(&request.recipient.to_string()));

        tracing::info!(chain = chain.name, "Sending transaction");
        let tx_hash = self.submitter.submit_mint(&call).await?;

        let tx_hash = tx_hash.to_string();
        let explorer_url = chain.tx_url(&tx_hash);
        tracing::info!(tx_hash = %tx_hash, explorer_url = %explorer_url, "Transaction confirmed");

        Ok(SettlementResult {
            tx_hash,
            explorer_url,
        })
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }
}
