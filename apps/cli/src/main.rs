//! # travelmate: Command-Line Booking Client
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse arguments                                                     │
//! │  2. Initialize logging (stderr)                                         │
//! │  3. Load ClientConfig (defaults → config.toml → TRAVELMATE_* env)       │
//! │  4. Run the command                                                     │
//! │  5. On error: message (or JSON report) on stderr, mapped exit code      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use travelmate_client::ClientConfig;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, CliResult};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too and exit 0.
            let code = if e.use_stderr() { 2 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    if let Err(e) = logging::init_logging(cli.global.verbose) {
        eprintln!("{}", e);
    }

    let json = cli.global.json;
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            if json {
                match serde_json::to_string(&e.report()) {
                    Ok(line) => eprintln!("{}", line),
                    Err(_) => eprintln!("{}", e.user_message()),
                }
            } else {
                eprintln!("error: {}", e.user_message());
            }
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = load_config(&cli)?;
    debug!(base_url = %config.api.base_url, "Configuration loaded");
    commands::run(cli.command, config, &cli.global).await
}

/// Offline commands still run with a broken config file; `config init`
/// in particular must be able to overwrite one.
fn load_config(cli: &Cli) -> CliResult<ClientConfig> {
    match ClientConfig::load(cli.global.config.clone()) {
        Ok(config) => Ok(config),
        Err(e) if needs_api(&cli.command) => Err(CliError::from(e)),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring unreadable configuration");
            Ok(ClientConfig::default())
        }
    }
}

fn needs_api(command: &Commands) -> bool {
    matches!(
        command,
        Commands::Book(_) | Commands::Bookings(_) | Commands::Cancel(_)
    )
}
