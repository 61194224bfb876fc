//! Blockchain RPC client.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint, attaching the provider secret only for thirdweb hosts
//! - Attach the server wallet so transactions are signed and filled locally
//! - Check the remote chain ID against the chain table (warning only)

use std::time::Duration;

use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::client::RpcClient;
use alloy::transports::http::Http;
use reqwest::header::{HeaderMap, HeaderValue};
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};
use crate::blockchain::wallet::Wallet;
use crate::config::chain::ChainConfig;

/// Header carrying the provider secret on thirdweb RPC requests.
pub const SECRET_KEY_HEADER: &str = "x-secret-key";

/// Domain whose hosts (and subdomains) may receive the provider secret.
pub const THIRDWEB_DOMAIN: &str = "thirdweb.com";

/// Upper bound for the chain ID probe. Submission itself uses provider defaults.
pub const PROBE_TIMEOUT_SECS: u64 = 10;

/// RPC client bound to one chain and one signing wallet.
#[derive(Clone)]
pub struct BlockchainClient {
    provider: DynProvider,
    rpc_url: String,
    chain_id: u64,
    sender: Address,
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a new blockchain client.
    ///
    /// # Arguments
    /// * `chain` - Chain the request targets
    /// * `rpc_url` - Endpoint to use (the chain's own URL or an override)
    /// * `secret_key` - Provider secret, sent as [`SECRET_KEY_HEADER`] to thirdweb hosts only
    /// * `wallet` - Signing wallet for outgoing transactions
    ///
    /// A failed chain ID probe is logged, not returned: the submission step
    /// surfaces connectivity problems with a more useful error.
    pub async fn connect(
        chain: &ChainConfig,
        rpc_url: &str,
        secret_key: &str,
        wallet: Wallet,
    ) -> BlockchainResult<Self> {
        let url: url::Url = rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", rpc_url, e))
        })?;

        let mut headers = HeaderMap::new();
        if is_thirdweb_host(&url) {
            let mut secret = HeaderValue::from_str(secret_key)
                .map_err(|e| BlockchainError::Rpc(format!("Invalid secret key header: {}", e)))?;
            secret.set_sensitive(true);
            headers.insert(SECRET_KEY_HEADER, secret);
        } else {
            tracing::debug!(rpc_url = %url, "RPC host is not thirdweb, secret key withheld");
        }

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| BlockchainError::Rpc(format!("Failed to build HTTP client: {}", e)))?;

        let sender = wallet.address();
        let transport = Http::with_client(http_client, url);
        let provider = ProviderBuilder::new()
            .wallet(wallet.into_ethereum_wallet())
            .connect_client(RpcClient::new(transport, false))
            .erased();

        let client = Self {
            provider,
            rpc_url: rpc_url.to_string(),
            chain_id: chain.chain_id,
            sender,
            timeout_duration: Duration::from_secs(PROBE_TIMEOUT_SECS),
        };

        match client.verify_chain_id().await {
            Ok(()) => {
                tracing::info!(
                    rpc_url = %client.rpc_url,
                    chain_id = client.chain_id,
                    "Blockchain client initialized"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    rpc_url = %client.rpc_url,
                    "Blockchain client initialized but chain verification failed"
                );
            }
        }

        Ok(client)
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.chain_id {
            return Err(BlockchainError::ChainMismatch {
                expected: self.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        match timeout(self.timeout_duration, self.provider.get_chain_id()).await {
            Ok(Ok(id)) => Ok(ChainId(id)),
            Ok(Err(e)) => Err(BlockchainError::Rpc(e.to_string())),
            Err(_) => Err(BlockchainError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// Wallet-filled provider used for submission.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Address transactions are sent from.
    pub fn sender(&self) -> Address {
        self.sender
    }
}

/// Whether `url` points at thirdweb's own infrastructure.
pub fn is_thirdweb_host(url: &url::Url) -> bool {
    match url.host_str() {
        Some(host) => {
            let host = host.trim_end_matches('.').to_ascii_lowercase();
            host == THIRDWEB_DOMAIN || host.ends_with(&format!(".{}", THIRDWEB_DOMAIN))
        }
        None => false,
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id)
            .field("sender", &self.sender)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::chain::Network;

    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn wallet() -> Wallet {
        Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap()
    }

    #[tokio::test]
    async fn test_connect_tolerates_unreachable_rpc() {
        // Nothing listens on port 1; the probe fails but construction succeeds
        let chain = Network::MonadTestnet.chain();
        let client = BlockchainClient::connect(chain, "http://127.0.0.1:1", "secret", wallet())
            .await
            .unwrap();
        assert_eq!(client.chain_id, 41454);
        assert_eq!(client.sender(), wallet().address());
        assert!(client.verify_chain_id().await.is_err());
    }

    #[tokio::test]
    async fn test_invalid_rpc_url() {
        let chain = Network::MonadTestnet.chain();
        let err = BlockchainClient::connect(chain, "not a url", "secret", wallet())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid RPC URL"));
    }

    #[tokio::test]
    async fn test_invalid_secret_header() {
        let chain = Network::MonadMainnet.chain();
        let url = "https://41454.rpc.thirdweb.com";
        let err = BlockchainClient::connect(chain, url, "bad\nsecret", wallet())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid secret key header"));
    }

    #[test]
    fn test_thirdweb_host_detection() {
        let check = |raw: &str| is_thirdweb_host(&raw.parse().unwrap());
        assert!(check("https://41454.rpc.thirdweb.com"));
        assert!(check("https://RPC.THIRDWEB.COM/abc"));
        assert!(check("https://thirdweb.com"));
        assert!(!check("https://testnet.monad.xyz"));
        assert!(!check("https://rpc.monad.xyz"));
        assert!(!check("https://thirdweb.com.attacker.io"));
        assert!(!check("https://notthirdweb.com"));
        assert!(!check("http://127.0.0.1:8545"));
    }

    #[tokio::test]
    async fn test_debug_omits_secret() {
        let chain = Network::MonadTestnet.chain();
        let client = BlockchainClient::connect(chain, "http://127.0.0.1:1", "tw-secret", wallet())
            .await
            .unwrap();
        let rendered = format!("{:?}", client);
        assert!(rendered.contains("127.0.0.1:1"));
        assert!(!rendered.contains("tw-secret"));
    }
}
