//! Command-line interface.

pub mod check;
pub mod command;
pub mod run;
pub mod scan;

use std::path::Path;

use tracing::warn;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

pub use command::{Cli, Commands, ScanArgs};

/// Dispatch a parsed command line.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a command fails.
pub async fn execute(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Run => run::execute(&cli.config).await,
        Commands::Scan(args) => scan::execute(&cli.config, args).await,
        Commands::CheckConfig => check::execute(&cli.config),
    }
}

/// Load the configuration file, falling back to defaults when it is absent.
///
/// Secrets are read from the environment either way.
pub(crate) fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::load(path)
    } else {
        warn!(path = %path.display(), "Config file not found, using defaults");
        Config::parse_toml("")
    }
}
