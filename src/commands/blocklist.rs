//! `histfetch blocklist` command - print the invalid-ID store

use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::{exclusion_store, print_json};
use histfetch_core::config::FetchConfig;
use histfetch_core::error::Result;
use histfetch_core::ids::format_id_list;

/// Execute the blocklist command
pub fn execute(cli: &Cli, config: &FetchConfig, invalid_store: Option<&Path>) -> Result<()> {
    let store = exclusion_store(config, invalid_store, None)?;
    let ids = store.load_invalid();

    match cli.format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "path": store.invalid_path().display().to_string(),
            "count": ids.len(),
            "ids": ids,
        })),
        OutputFormat::Human => {
            if ids.is_empty() {
                if !cli.quiet {
                    println!("Blocklist is empty.");
                }
            } else {
                println!("{}", format_id_list(&ids));
            }
            Ok(())
        }
    }
}
