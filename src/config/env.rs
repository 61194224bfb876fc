//! Raw settlement inputs read from the process environment.

use std::collections::HashMap;
use std::path::Path;

pub const THIRDWEB_SECRET_KEY: &str = "THIRDWEB_SECRET_KEY";
pub const SERVER_WALLET: &str = "SERVER_WALLET";
pub const SCORE_TOKEN_CONTRACT: &str = "SCORE_TOKEN_CONTRACT";
pub const RECIPIENT_WALLET: &str = "RECIPIENT_WALLET";
pub const SCORE_AMOUNT: &str = "SCORE_AMOUNT";
pub const NETWORK: &str = "NETWORK";
pub const ISSUE_NUMBER: &str = "ISSUE_NUMBER";
pub const REPO_NAME: &str = "REPO_NAME";
pub const RPC_URL: &str = "RPC_URL";

/// Set by GitHub Actions on every runner.
pub const GITHUB_ACTIONS: &str = "GITHUB_ACTIONS";
/// Path of the step output file.
pub const GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

/// Required keys, in the order they are reported when missing.
pub const REQUIRED_VARS: [&str; 8] = [
    THIRDWEB_SECRET_KEY,
    SERVER_WALLET,
    SCORE_TOKEN_CONTRACT,
    RECIPIENT_WALLET,
    SCORE_AMOUNT,
    NETWORK,
    ISSUE_NUMBER,
    REPO_NAME,
];

/// Snapshot of every variable the settlement reads.
///
/// Values are stored verbatim; trimming and parsing happen in validation.
#[derive(Clone, Default)]
pub struct SettlementEnv {
    values: HashMap<&'static str, String>,
}

impl SettlementEnv {
    /// Build a snapshot from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let values = REQUIRED_VARS
            .iter()
            .chain(std::iter::once(&RPC_URL))
            .filter_map(|key| lookup(*key).map(|value| (*key, value)))
            .collect();
        Self { values }
    }

    /// Read the snapshot from the current process environment.
    pub fn from_process_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Raw value for `key`, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value for `key` with surrounding whitespace removed; empty counts as unset.
    pub fn trimmed(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Required keys that are unset or blank.
    pub fn missing(&self) -> Vec<&'static str> {
        REQUIRED_VARS
            .iter()
            .copied()
            .filter(|key| self.trimmed(key).is_none())
            .collect()
    }
}

impl std::fmt::Debug for SettlementEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.values.keys().copied().collect();
        keys.sort_unstable();
        f.debug_struct("SettlementEnv").field("keys", &keys).finish()
    }
}

/// Whether the process runs on a GitHub Actions runner.
pub fn running_in_ci() -> bool {
    std::env::var_os(GITHUB_ACTIONS).is_some()
}

/// Load a dotenv file for local runs. Variables already set win.
///
/// Returns whether a file was loaded; a missing file is not an error.
pub fn load_local_env(path: &Path) -> Result<bool, dotenvy::Error> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Loaded local environment file");
            Ok(true)
        }
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e),
    }
}
