//! Static chain metadata keyed by network identifier.
//!
//! The table is fixed at compile time. The only runtime input is the optional
//! `RPC_URL` override, which is applied by the caller and never written back.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while resolving chain configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The network identifier is not in the chain table.
    #[error("Unknown network: {network}. Supported: {supported}")]
    UnknownNetwork { network: String, supported: String },
}

/// Supported deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    MonadTestnet,
    MonadMainnet,
}

impl Network {
    /// Every supported network, in the order they are listed to users.
    pub const ALL: [Network; 2] = [Network::MonadTestnet, Network::MonadMainnet];

    /// Identifier as it appears in `NETWORK`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::MonadTestnet => "monad-testnet",
            Network::MonadMainnet => "monad-mainnet",
        }
    }

    /// Chain metadata for this network.
    pub fn chain(&self) -> &'static ChainConfig {
        match self {
            Network::MonadTestnet => &MONAD_TESTNET,
            Network::MonadMainnet => &MONAD_MAINNET,
        }
    }

    /// Comma-separated list of supported identifiers.
    pub fn supported() -> String {
        Self::ALL
            .iter()
            .map(Network::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|network| network.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownNetwork {
                network: s.to_string(),
                supported: Self::supported(),
            })
    }
}

/// Native gas currency of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

/// Chain metadata for one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainConfig {
    pub network: Network,
    pub chain_id: u64,
    pub name: &'static str,
    pub rpc_url: &'static str,
    pub explorer_url: &'static str,
    pub native_currency: NativeCurrency,
}

const MON: NativeCurrency = NativeCurrency {
    name: "MON",
    symbol: "MON",
    decimals: 18,
};

pub static MONAD_TESTNET: ChainConfig = ChainConfig {
    network: Network::MonadTestnet,
    chain_id: 41454,
    name: "Monad Testnet",
    rpc_url: "https://testnet.monad.xyz",
    explorer_url: "https://testnet.monadvision.com",
    native_currency: MON,
};

pub static MONAD_MAINNET: ChainConfig = ChainConfig {
    network: Network::MonadMainnet,
    chain_id: 41454,
    name: "Monad Mainnet",
    rpc_url: "https://rpc.monad.xyz",
    explorer_url: "https://monadvision.com",
    native_currency: MON,
};

impl ChainConfig {
    /// Explorer page for a transaction.
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }

    /// Explorer page for a wallet or contract.
    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.explorer_url, address)
    }

    /// RPC endpoint, preferring the override when one is given.
    pub fn rpc_url_or<'a>(&'a self, rpc_override: Option<&'a str>) -> &'a str {
        rpc_override.unwrap_or(self.rpc_url)
    }
}

/// Resolve a network identifier to its chain metadata.
pub fn chain_config(network: &str) -> Result<&'static ChainConfig, ConfigError> {
    network.parse::<Network>().map(|n| n.chain())
}

/// Explorer URL for a transaction hash on `network`.
pub fn explorer_tx_url(tx_hash: &str, network: &str) -> Result<String, ConfigError> {
    Ok(chain_config(network)?.tx_url(tx_hash))
}

/// Explorer URL for an address on `network`.
pub fn explorer_address_url(address: &str, network: &str) -> Result<String, ConfigError> {
    Ok(chain_config(network)?.address_url(address))
}
