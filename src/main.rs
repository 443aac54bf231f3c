//! Histfetch - review history to question-bank batches
//!
//! Reads which flashcards were reviewed recently, collects the question-bank
//! IDs tagged on their notes, optionally widens the set through shared tags,
//! and prints ready-to-paste batches.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::{Cli, OutputFormat};
use histfetch_core::error::{ExitCode as FetchExitCode, FetchError};
use histfetch_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if wants_json(env::args().skip(1)) => return report_parse_error(err),
        Err(err) => err.exit(),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    let Err(e) = commands::dispatch::run(&cli, start) else {
        return ExitCode::from(FetchExitCode::Success as u8);
    };
    if cli.format == OutputFormat::Json {
        eprintln!("{}", e.to_json());
    } else if !cli.quiet {
        eprintln!("error: {}", e);
    }
    ExitCode::from(e.exit_code() as u8)
}

/// Emit a clap failure as a JSON error envelope. `--help` and `--version`
/// still print normally.
fn report_parse_error(err: clap::Error) -> ExitCode {
    use clap::error::ErrorKind;

    let error = match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        ErrorKind::ValueValidation
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::ArgumentConflict
        | ErrorKind::MissingRequiredArgument => FetchError::UsageError(err.to_string()),
        _ => FetchError::Other(err.to_string()),
    };
    eprintln!("{}", error.to_json());
    ExitCode::from(error.exit_code() as u8)
}

/// `--format json` / `--format=json` anywhere in raw argv. Used when clap
/// fails before `Cli.format` exists.
fn wants_json<I>(args: I) -> bool
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--format=json" => return true,
            "--format" if args.next().as_deref() == Some("json") => return true,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_wants_json() {
        assert!(wants_json(argv(&["--format", "json", "fetch", "--mix", "150"])));
        assert!(wants_json(argv(&["fetch", "--format=json"])));
        assert!(!wants_json(argv(&["--format", "human", "fetch"])));
        assert!(!wants_json(argv(&["block", "json"])));
        assert!(!wants_json(argv(&["--format"])));
    }
}
