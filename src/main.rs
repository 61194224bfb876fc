//! Score settlement CLI.
//!
//! Runs inside a CI job: reads the settlement variables, mints the score
//! tokens, prints a summary and appends `TX_HASH` / `EXPLORER_URL` (or
//! `ERROR_MESSAGE`) to the step output file. Exits 1 on any failure.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use score_settlement::config::{chain_config, env, Network, SettlementEnv};
use score_settlement::observability::logging::init_logging;
use score_settlement::settlement::output::summary;
use score_settlement::settlement::{self, CiOutput, SettlementError};

#[derive(Parser)]
#[command(name = "score-settlement")]
#[command(
    about = "Mint score tokens to a contributor and report the result to CI",
    long_about = None
)]
struct Cli {
    /// Dotenv file loaded when not running on GitHub Actions
    #[arg(long, default_value = ".env.local")]
    env_file: PathBuf,

    /// Step output file (defaults to $GITHUB_OUTPUT)
    #[arg(long)]
    github_output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint the score tokens described by the environment (default)
    Settle,
    /// Print the supported chain configurations as JSON
    Chains,
    /// Print the explorer link for a transaction or address
    Explorer {
        /// Network identifier, e.g. monad-testnet
        network: String,
        /// Transaction hash
        #[arg(long, conflicts_with = "address", required_unless_present = "address")]
        tx: Option<String>,
        /// Wallet or contract address
        #[arg(long)]
        address: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Loaded before the subscriber so RUST_LOG from the file applies
    let local_env = if env::running_in_ci() {
        Ok(false)
    } else {
        env::load_local_env(&cli.env_file)
    };

    init_logging();

    if let Err(e) = local_env {
        tracing::warn!(path = %cli.env_file.display(), error = %e, "Ignoring unreadable env file");
    }

    let output = match cli.github_output {
        Some(path) => CiOutput::new(Some(path)),
        None => CiOutput::from_env(),
    };

    match cli.command.unwrap_or(Commands::Settle) {
        Commands::Settle => run_settlement(&output).await,
        Commands::Chains => print_chains(),
        Commands::Explorer {
            network,
            tx,
            address,
        } => print_explorer_url(&network, tx.as_deref(), address.as_deref()),
    }
}

async fn run_settlement(output: &CiOutput) -> ExitCode {
    tracing::info!("Starting score settlement");

    let env = SettlementEnv::from_process_env();
    match settlement::run(&env, output).await {
        Ok(result) => {
            println!("{}", summary(&result));
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_failure(&e, output);
            ExitCode::FAILURE
        }
    }
}

fn report_failure(err: &SettlementError, output: &CiOutput) {
    tracing::error!(error = %err, details = ?err, "Score settlement failed");

    let mut source = err.source();
    while let Some(cause) = source {
        tracing::error!(cause = %cause, "Caused by");
        source = cause.source();
    }

    if let Err(write_err) = output.write_error(&err.to_string()) {
        tracing::error!(error = %write_err, "Failed to write ERROR_MESSAGE output");
    }
}

fn print_chains() -> ExitCode {
    let chains = Network::ALL.map(|network| network.chain());
    match serde_json::to_string_pretty(&chains) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize chain table");
            ExitCode::FAILURE
        }
    }
}

fn print_explorer_url(network: &str, tx: Option<&str>, address: Option<&str>) -> ExitCode {
    let chain = match chain_config(network) {
        Ok(chain) => chain,
        Err(e) => {
            tracing::error!(error = %e, "Cannot build explorer link");
            return ExitCode::FAILURE;
        }
    };

    match (tx, address) {
        (Some(hash), _) => println!("{}", chain.tx_url(hash)),
        (None, Some(addr)) => println!("{}", chain.address_url(addr)),
        (None, None) => return ExitCode::FAILURE,
    }
    ExitCode::SUCCESS
}
