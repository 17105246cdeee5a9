//! # Label It CLI
//!
//! Command-line interface for adding labels to the open pull requests of a GitHub
//! repository based on the rules in a YAML configuration file.
//!
//! # Examples
//!
//! ```bash
//! # Show which labels would be added
//! label-it --dry
//!
//! # Use another configuration file and skip the confirmation prompt
//! label-it -c config/label-it.yaml -y
//! ```

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

use clap::Parser;
use label_it_core::config::CURRENT_API_VERSION;
use std::io;
use std::process::{ExitCode, Termination};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Command implementations for the CLI.
mod commands;

/// Configuration file lookup for the CLI.
mod config;

/// Error types specific to the CLI.
mod errors;

use commands::label::LabelArgs;

/// Environment variable holding the log filter directives
const LOG_FILTER_ENV: &str = "LABEL_IT_LOG";

/// Command-line interface structure for Label It.
#[derive(Parser)]
#[command(author, version = version(), about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Labeling options
    #[command(flatten)]
    label: LabelArgs,
}

/// The tool version together with the configuration version it reads.
fn version() -> String {
    format!(
        "{} (config apiVersion {})",
        env!("CARGO_PKG_VERSION"),
        CURRENT_API_VERSION
    )
}

/// Builds the log filter. `LABEL_IT_LOG` wins over the `--verbose` default.
fn log_filter(verbose: bool) -> EnvFilter {
    let default_level = if verbose { "debug" } else { "warn" };
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Main entry point for the Label It CLI.
///
/// Logs go to stderr so that the summary and prompt on stdout stay readable. A
/// failed run exits with the code of its error class.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(log_filter(cli.verbose))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    match commands::label::execute(cli.label, &mut input, &mut output).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error labeling pull requests: {}", e);
            eprintln!("{}", e);
            e.report()
        }
    }
}
