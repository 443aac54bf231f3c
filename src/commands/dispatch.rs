//! Command dispatch logic for histfetch

use std::time::Instant;

use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::commands::{block, blocklist, fetch, show};
use histfetch_core::config::FetchConfig;
use histfetch_core::error::{FetchError, Result};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config = load_config(cli)?;
    debug!(elapsed = ?start.elapsed(), "load_config");

    match &cli.command {
        Commands::Fetch(args) => fetch::execute(cli, &config, args, start),

        Commands::Block {
            text,
            refill,
            invalid_store,
        } => block::execute(
            cli,
            &config,
            text.as_deref(),
            *refill,
            invalid_store.as_deref(),
        ),

        Commands::Show { overflow } => show::execute(cli, &config, *overflow),

        Commands::Blocklist { invalid_store } => {
            blocklist::execute(cli, &config, invalid_store.as_deref())
        }
    }
}

/// An explicit `--config` must exist; the default location may be absent
fn load_config(cli: &Cli) -> Result<FetchConfig> {
    match &cli.config {
        Some(path) if !path.exists() => Err(FetchError::not_found("config file", path.display())),
        Some(path) => FetchConfig::load_from(path),
        None => FetchConfig::load(),
    }
}
