//! CLI definitions for PagePilot.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// PagePilot CLI.
#[derive(Parser)]
#[command(name = "pagepilot")]
#[command(about = "Grounded browser-agent core")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.pagepilot/config.toml)
    #[arg(short, long, global = true, env = "PAGEPILOT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Parse a recorded snapshot and print its interactive elements
    Inspect {
        /// Raw snapshot JSON as produced by the page script
        snapshot: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the registered actions and their parameter schemas
    Actions {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Validate the configuration and print the effective settings
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}
