//! Settlement input validation.
//!
//! # Responsibilities
//! - Presence checks over every required variable (all missing keys reported together)
//! - Address format checks for the token contract and the recipient
//! - Positive integer parsing for the score amount
//! - Network resolution against the chain table
//!
//! Runs before any network call. Validation is a pure function of the
//! [`SettlementEnv`] snapshot.

use std::str::FromStr;

use alloy::primitives::{Address, U256};
use thiserror::Error;

use crate::config::chain::{ConfigError, Network};
use crate::config::env::{
    SettlementEnv, ISSUE_NUMBER, NETWORK, RECIPIENT_WALLET, REPO_NAME, RPC_URL, SCORE_AMOUNT,
    SCORE_TOKEN_CONTRACT, SERVER_WALLET, THIRDWEB_SECRET_KEY,
};
use crate::settlement::types::{Credentials, SettlementRequest};

/// Input validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required variables are unset or blank.
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    /// A variable does not hold a well-formed account address.
    #[error("Invalid {var} address: {value}")]
    InvalidAddress { var: &'static str, value: String },

    /// The score amount is not a positive integer.
    #[error("Invalid SCORE_AMOUNT: {0}")]
    InvalidAmount(String),

    /// The RPC override is not a URL.
    #[error("Invalid RPC_URL '{value}': {reason}")]
    InvalidRpcUrl { value: String, reason: String },

    /// The network identifier is not supported.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything a settlement run needs, validated.
#[derive(Debug, Clone)]
pub struct ValidatedInput {
    pub request: SettlementRequest,
    pub credentials: Credentials,
    /// Replaces the chain table's RPC endpoint when set.
    pub rpc_url: Option<String>,
}

/// Validate the environment snapshot and build the settlement inputs.
pub fn validate(env: &SettlementEnv) -> Result<ValidatedInput, ValidationError> {
    let missing = env.missing();
    if !missing.is_empty() {
        return Err(ValidationError::Missing(missing));
    }

    let token_contract = parse_address_var(env, SCORE_TOKEN_CONTRACT)?;
    let recipient = parse_address_var(env, RECIPIENT_WALLET)?;
    let amount = parse_amount(required(env, SCORE_AMOUNT))?;
    let network: Network = required(env, NETWORK).parse()?;

    let rpc_url = match env.trimmed(RPC_URL) {
        Some(raw) => {
            url::Url::parse(raw).map_err(|e| ValidationError::InvalidRpcUrl {
                value: raw.to_string(),
                reason: e.to_string(),
            })?;
            Some(raw.to_string())
        }
        None => None,
    };

    let request = SettlementRequest {
        recipient,
        amount,
        network,
        issue_number: required(env, ISSUE_NUMBER).to_string(),
        repo_name: required(env, REPO_NAME).to_string(),
        token_contract,
    };

    let credentials = Credentials::new(
        required(env, THIRDWEB_SECRET_KEY),
        required(env, SERVER_WALLET),
    );

    Ok(ValidatedInput {
        request,
        credentials,
        rpc_url,
    })
}

/// Presence was already checked, so a blank here can only mean a caller bug.
fn required<'a>(env: &'a SettlementEnv, key: &str) -> &'a str {
    env.trimmed(key).unwrap_or_default()
}

/// Strip whitespace and stray quoting that CI templating tends to leave behind.
pub fn sanitize_address(raw: &str) -> String {
    raw.trim().replace(['\'', '"'], "")
}

fn parse_address_var(env: &SettlementEnv, var: &'static str) -> Result<Address, ValidationError> {
    let value = sanitize_address(required(env, var));
    parse_address(&value).ok_or(ValidationError::InvalidAddress { var, value })
}

/// Parse a 20-byte hex address.
///
/// The `0x` prefix is optional. All-lowercase and all-uppercase input is
/// accepted as-is; mixed case must carry a valid EIP-55 checksum.
pub fn parse_address(value: &str) -> Option<Address> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        Address::parse_checksummed(format!("0x{digits}"), None).ok()
    } else {
        Address::from_str(digits).ok()
    }
}

/// Parse a strictly positive base-10 integer.
pub fn parse_amount(raw: &str) -> Result<U256, ValidationError> {
    let value = raw.trim();
    let invalid = || ValidationError::InvalidAmount(raw.to_string());

    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let amount = U256::from_str_radix(value, 10).map_err(|_| invalid())?;
    if amount.is_zero() {
        return Err(invalid());
    }
    Ok(amount)
}
