//! `histfetch show` command - re-display the saved session

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::print_json;
use histfetch_core::config::FetchConfig;
use histfetch_core::error::Result;
use histfetch_core::ids::join_ids;
use histfetch_core::session::FetchSession;

/// Execute the show command
pub fn execute(cli: &Cli, config: &FetchConfig, show_overflow: bool) -> Result<()> {
    let session = FetchSession::load(&config.session_path()?)?;

    match cli.format {
        OutputFormat::Json => {
            let mut output = serde_json::json!({
                "created_at": session.created_at,
                "batch_size": session.batch_size,
                "count": session.ids.len(),
                "batches": session.batches(),
                "overflow_count": session.overflow.len(),
            });
            if show_overflow {
                if let Some(obj) = output.as_object_mut() {
                    obj.insert("overflow".to_string(), serde_json::to_value(&session.overflow)?);
                }
            }
            print_json(&output)
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!(
                    "Session from {} ({} IDs)",
                    session.created_at.format("%Y-%m-%d %H:%M UTC"),
                    session.ids.len()
                );
                println!();
            }
            println!("{}", session.render().trim_end());

            if show_overflow {
                println!();
                println!("--- Overflow ({} IDs) ---", session.overflow.len());
                if !session.overflow.is_empty() {
                    println!("{}", join_ids(&session.overflow));
                }
            }
            Ok(())
        }
    }
}
