//! `histfetch block` command - blocklist IDs from a pasted error message

use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::{exclusion_store, print_json, read_stdin};
use histfetch_core::blocklist::{apply_error_report, BlockOutcome};
use histfetch_core::config::FetchConfig;
use histfetch_core::error::{FetchError, Result};
use histfetch_core::session::FetchSession;

/// Execute the block command
///
/// Without a saved session the IDs are still added to the blocklist.
pub fn execute(
    cli: &Cli,
    config: &FetchConfig,
    text: Option<&str>,
    refill: bool,
    invalid_store: Option<&Path>,
) -> Result<()> {
    let error_text = match text {
        Some(text) => text.to_string(),
        None => read_stdin()?,
    };

    let store = exclusion_store(config, invalid_store, None)?;
    let session_path = config.session_path()?;

    let mut session = match FetchSession::load(&session_path) {
        Ok(session) => Some(session),
        Err(FetchError::NoSession) => None,
        Err(e) => return Err(e),
    };

    let (outcome, refilled) = match session.as_mut() {
        Some(session) => {
            let outcome = session.remove_bad_ids(&error_text, &store);
            let refilled = if refill && !outcome.is_no_match() {
                session.refill()
            } else {
                0
            };
            if !outcome.is_no_match() {
                session.save(&session_path)?;
            }
            (outcome, refilled)
        }
        None => (apply_error_report(&error_text, &[], &store), 0),
    };

    match cli.format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "blocked": outcome.blocked,
            "removed_count": outcome.removed_count,
            "persisted": outcome.persisted,
            "refilled": refilled,
            "remaining": session.as_ref().map(|s| s.ids.len()),
        })),
        OutputFormat::Human => {
            println!("{}", summary_line(&outcome, store.invalid_path()));
            if refilled > 0 {
                println!("Recalled {} IDs from overflow.", refilled);
            }
            if let Some(session) = session.filter(|_| !cli.quiet && !outcome.is_no_match()) {
                println!();
                println!("{}", session.render().trim_end());
            }
            Ok(())
        }
    }
}

fn summary_line(outcome: &BlockOutcome, store_path: &Path) -> String {
    if outcome.is_no_match() {
        return "No numbers found in the pasted text.".to_string();
    }
    match (outcome.removed_count, outcome.persisted) {
        (0, true) => "IDs saved to blocklist (none were in current list).".to_string(),
        (n, true) => format!("Removed {} invalid IDs and saved them to blocklist.", n),
        (n, false) => format!(
            "Removed {} invalid IDs, but the blocklist at {} could not be saved.",
            n,
            store_path.display()
        ),
    }
}
