//! `histfetch fetch` command - build batches from recent reviews

use std::time::Instant;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::cli::{Cli, FetchArgs, OutputFormat};
use crate::commands::helpers::{exclusion_store, print_json};
use histfetch_core::bail_usage;
use histfetch_core::collection::AnkiCollection;
use histfetch_core::config::FetchConfig;
use histfetch_core::error::Result;
use histfetch_core::pipeline::{self, EmptyReason, FetchRequest, FetchRun, RunOutcome};
use histfetch_core::seed::StateFilter;
use histfetch_core::session::FetchSession;
use histfetch_core::window::ReviewWindow;

/// Execute the fetch command
pub fn execute(cli: &Cli, config: &FetchConfig, args: &FetchArgs, start: Instant) -> Result<()> {
    let request = build_request(config, args)?;

    let Some(collection_path) = args
        .collection
        .clone()
        .or_else(|| config.paths.collection.clone())
    else {
        bail_usage!("no collection configured (pass --collection or set paths.collection)");
    };
    let collection = AnkiCollection::open(&collection_path, config.rollover_hour)?;
    let store = exclusion_store(config, args.invalid_store.as_deref(), args.mastered.as_deref())?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let now_ms = Utc::now().timestamp_millis();
    let outcome = pipeline::run(&collection, &store, &request, now_ms, &mut rng)?;
    debug!(elapsed = ?start.elapsed(), "pipeline");

    match outcome {
        RunOutcome::Empty(reason) => print_empty(cli, &reason),
        RunOutcome::Found(run) => {
            let FetchRun {
                range,
                seed_count,
                depth_reached,
                selection,
            } = run;
            let session =
                FetchSession::from_selection(selection, request.mix.batch_size, Utc::now());
            session.save(&config.session_path()?)?;

            match cli.format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "range": range,
                    "seed_count": seed_count,
                    "depth_reached": depth_reached,
                    "stats": session.stats,
                    "batches": session.batches(),
                    "overflow": session.overflow,
                })),
                OutputFormat::Human => {
                    print_human(cli, &session, request.mix.horizontal_enabled, depth_reached);
                    Ok(())
                }
            }
        }
    }
}

/// Merge config defaults with per-run flags
fn build_request(config: &FetchConfig, args: &FetchArgs) -> Result<FetchRequest> {
    let window = match (args.since, args.until, args.hours) {
        (Some(start_ms), Some(end_ms), _) => ReviewWindow::Range { start_ms, end_ms },
        (_, _, Some(hours)) => ReviewWindow::LastHours {
            hours: hours.unwrap_or(config.hours),
        },
        _ => ReviewWindow::Today,
    };

    let states = StateFilter {
        learning: config.states.learning && !args.no_learning,
        young: config.states.young && !args.no_young,
        mature: config.states.mature && !args.no_mature,
    };

    let mut mix = config.mix_options();
    if let Some(batch_size) = args.batch_size {
        mix.batch_size = batch_size;
    }
    if let Some(mix_percent) = args.mix {
        mix.mix_percent = mix_percent;
    }
    mix.horizontal_enabled |= args.horizontal;
    mix.include_mastered |= args.include_mastered;
    mix.randomize |= args.random;

    Ok(FetchRequest {
        window,
        states,
        pattern: config.tag_pattern()?,
        max_depth: args.depth.unwrap_or(config.max_depth),
        mix,
    })
}

fn print_human(cli: &Cli, session: &FetchSession, horizontal: bool, depth_reached: usize) {
    if !cli.quiet {
        if let Some(summary) = session.stats.removed_summary() {
            println!("Automatically removed: {}", summary);
        }
        if horizontal {
            println!(
                "Selected {} direct + {} horizontal IDs (depth {}, {} in overflow)",
                session.stats.direct_selected,
                session.stats.horizontal_selected,
                depth_reached,
                session.overflow.len()
            );
        }
        println!();
    }
    println!("{}", session.render().trim_end());
}

fn print_empty(cli: &Cli, reason: &EmptyReason) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            let mut output = serde_json::to_value(reason)?;
            if let Some(obj) = output.as_object_mut() {
                obj.insert("empty".to_string(), serde_json::Value::Bool(true));
                obj.insert(
                    "message".to_string(),
                    serde_json::Value::String(reason.to_string()),
                );
            }
            print_json(&output)
        }
        OutputFormat::Human => {
            println!("{}", reason);
            Ok(())
        }
    }
}
