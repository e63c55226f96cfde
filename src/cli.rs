// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `snowdaemon`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "snowdaemon",
    version,
    about = "Configure and run a supervised service.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the snowdaemon config file (YAML).
    #[arg(long, value_name = "PATH", default_value = "./snowdaemon/config.yaml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SNOWDAEMON_LOG` or the config file's `logging.min_level`
    /// will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the service command line without fetching
    /// configuration or spawning anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
