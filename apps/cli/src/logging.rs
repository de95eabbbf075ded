//! Tracing subscriber setup. Only the binary installs a subscriber; the
//! library crates just emit events.
//!
//! | Flag   | Filter                                   |
//! |--------|------------------------------------------|
//! | (none) | `info`                                   |
//! | `-v`   | `info`, travelmate crates at `debug`     |
//! | `-vv`  | `debug`, travelmate crates at `trace`    |
//!
//! `RUST_LOG` overrides all of the above.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, CliResult};

/// Installs the global subscriber, writing to stderr so stdout stays clean
/// for command output.
pub fn init_logging(verbose: u8) -> CliResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}

fn default_directives(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "info,travelmate=debug,travelmate_client=debug",
        _ => "debug,travelmate=trace,travelmate_client=trace",
    }
}
