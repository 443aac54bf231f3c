//! CLI argument parsing for histfetch
//!
//! Global flags: --config, --format, --quiet, --verbose, --log-level, --log-json

pub mod args;
pub mod parse;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::FetchArgs;
pub use histfetch_core::format::OutputFormat;
use parse::parse_output_format;

/// Histfetch - turn recent reviews into question-bank batches
#[derive(Parser, Debug)]
#[command(name = "histfetch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: ~/.config/histfetch/config.toml)
    #[arg(long, global = true, env = "HISTFETCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (human or json)
    #[arg(long, global = true, value_parser = parse_output_format, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Debug logging and stage timings
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level filter (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch question IDs from recently reviewed cards
    Fetch(FetchArgs),

    /// Block IDs named in a question-bank error message
    Block {
        /// Pasted error text (read from stdin when omitted)
        text: Option<String>,

        /// Top the list back up from the overflow afterwards
        #[arg(long)]
        refill: bool,

        /// Invalid-ID store (overrides config)
        #[arg(long)]
        invalid_store: Option<PathBuf>,
    },

    /// Show the batches of the last fetch
    Show {
        /// Also list the unselected remainder
        #[arg(long)]
        overflow: bool,
    },

    /// Print the invalid-ID blocklist
    Blocklist {
        /// Invalid-ID store (overrides config)
        #[arg(long)]
        invalid_store: Option<PathBuf>,
    },
}
