//! CLI argument parsing for recap
//!
//! Global flags: --vault, --config, --format, --quiet, --verbose

pub mod output;
pub mod parse;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use recap_core::recap::RecapKind;
pub use output::OutputFormat;
use parse::{parse_date, parse_datetime, parse_recap_kind};

/// Recap - weekly and monthly digests of dated Markdown notes
#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Vault directory holding the notes (defaults to the current directory)
    #[arg(long, global = true, env = "RECAP_VAULT")]
    pub vault: Option<PathBuf>,

    /// Config file (defaults to <vault>/.recap/config.toml)
    #[arg(long, global = true, env = "RECAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level filter (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one recap now
    Run {
        /// monthly, weekly or summary
        #[arg(value_parser = parse_recap_kind)]
        kind: RecapKind,

        /// Date the previous-week summary is computed from (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,
    },

    /// Run the recaps that are due this hour (for cron or a systemd timer)
    Auto {
        /// Evaluate as if it were this local time (YYYY-MM-DDTHH:MM)
        #[arg(long, value_parser = parse_datetime)]
        at: Option<NaiveDateTime>,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective config with the API key masked
    Show,

    /// Write a default config file if none exists
    Init,

    /// Print the config file location
    Path,
}
