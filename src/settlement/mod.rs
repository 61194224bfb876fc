//! Score settlement pipeline.
//!
//! # Data Flow
//! ```text
//! SettlementEnv (process environment)
//!     → config::validation (presence, addresses, amount, network)
//!     → blockchain::Wallet + BlockchainClient
//!     → executor.rs (one mint, wait for receipt)
//!     → output.rs (TX_HASH / EXPLORER_URL for the pipeline)
//! ```
//!
//! Each run is all-or-nothing. There is no retry and no partial recovery;
//! callers report the error and exit non-zero.

pub mod executor;
pub mod output;
pub mod types;

use tracing::Instrument;
use uuid::Uuid;

use crate::blockchain::{BlockchainClient, ContractSubmitter, MintSubmitter, Wallet};
use crate::config::env::SettlementEnv;
use crate::config::validation::{validate, ValidatedInput};

pub use executor::SettlementExecutor;
pub use output::CiOutput;
pub use types::{
    Credentials, SettlementError, SettlementOutcome, SettlementRequest, SettlementResult,
};

/// Validate `env`, mint once against the live chain and record the outputs.
pub async fn run(env: &SettlementEnv, output: &CiOutput) -> SettlementOutcome<SettlementResult> {
    let input = validate(env)?;
    let span = tracing::info_span!(
        "settlement",
        run_id = %Uuid::new_v4(),
        network = %input.request.network,
        issue = %input.request.issue_number,
        repo = %input.request.repo_name
    );

    async move {
        let executor = connect(&input).await?;
        settle(&executor, &input.request, output).await
    }
    .instrument(span)
    .await
}

/// Build the live executor for validated input.
pub async fn connect(
    input: &ValidatedInput,
) -> SettlementOutcome<SettlementExecutor<ContractSubmitter>> {
    let chain = input.request.network.chain();
    let rpc_url = chain.rpc_url_or(input.rpc_url.as_deref());

    let wallet = Wallet::from_private_key(input.credentials.server_wallet_key())?;
    let secret_key = input.credentials.secret_key();
    let client = BlockchainClient::connect(chain, rpc_url, secret_key, wallet).await?;

    Ok(SettlementExecutor::new(ContractSubmitter::new(client)))
}

/// Execute `request` and append the success outputs.
pub async fn settle<S: MintSubmitter>(
    executor: &SettlementExecutor<S>,
    request: &SettlementRequest,
    output: &CiOutput,
) -> SettlementOutcome<SettlementResult> {
    let result = executor.execute(request).await?;
    output.write_success(&result)?;
    Ok(result)
}
