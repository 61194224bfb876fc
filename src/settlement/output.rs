//! Reporting back to the calling pipeline.
//!
//! GitHub Actions reads step outputs from the file named by `GITHUB_OUTPUT`,
//! one `KEY=value` per line. Values written here are single-line.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::env::GITHUB_OUTPUT;
use crate::settlement::types::SettlementResult;

pub const TX_HASH_KEY: &str = "TX_HASH";
pub const EXPLORER_URL_KEY: &str = "EXPLORER_URL";
pub const ERROR_MESSAGE_KEY: &str = "ERROR_MESSAGE";

/// Append-only writer for the CI output file.
///
/// Without a path every write is a no-op, so local runs need no setup.
#[derive(Debug, Clone, Default)]
pub struct CiOutput {
    path: Option<PathBuf>,
}

impl CiOutput {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Use the path from `GITHUB_OUTPUT`, if set and non-empty.
    pub fn from_env() -> Self {
        let path = std::env::var_os(GITHUB_OUTPUT)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Record a successful settlement.
    pub fn write_success(&self, result: &SettlementResult) -> io::Result<()> {
        self.append(&[
            (TX_HASH_KEY, result.tx_hash.as_str()),
            (EXPLORER_URL_KEY, result.explorer_url.as_str()),
        ])
    }

    /// Record a failure message, flattened to one line.
    pub fn write_error(&self, message: &str) -> io::Result<()> {
        self.append(&[(ERROR_MESSAGE_KEY, message)])
    }

    fn append(&self, fields: &[(&str, &str)]) -> io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let mut buf = String::new();
        for (key, value) in fields {
            buf.push_str(key);
            buf.push('=');
            buf.push_str(&single_line(value));
            buf.push('\n');
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(buf.as_bytes())?;
        tracing::debug!(path = %path.display(), keys = fields.len(), "Wrote CI outputs");
        Ok(())
    }
}

/// Replace line breaks so a value cannot spill into another output key.
pub fn single_line(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Human-readable result block for the job log.
pub fn summary(result: &SettlementResult) -> String {
    format!(
        "Score settlement completed successfully!\n\n\
         Transaction Hash:\n{}\n\n\
         Explorer Link:\n{}\n",
        result.tx_hash, result.explorer_url
    )
}
