//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Sharp-line +EV scanner for sportsbook player props
#[derive(Parser, Debug)]
#[command(name = "sharpedge")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan on a schedule until interrupted
    Run,

    /// Run a single scan cycle and print the report
    Scan(ScanArgs),

    /// Validate the configuration and print the effective settings
    CheckConfig,
}

/// Arguments for `sharpedge scan`.
#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,
}
