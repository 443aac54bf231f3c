//! Diagnostics for histfetch runs
//!
//! Everything goes to stderr so batches on stdout stay pasteable. The
//! filter comes from `RUST_LOG`, then `HISTFETCH_LOG`, then the CLI flags.
//! Pipeline stages log their timings at trace level through [`trace_time!`].

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log elapsed time for a pipeline stage at trace level.
///
/// ```rust,ignore
/// let start = Instant::now();
/// let expansion = expand(&provider, &seeds, depth)?;
/// trace_time!(start, "expand", layers = expansion.layers.len());
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

const CRATES: [&str; 2] = ["histfetch", "histfetch_core"];

/// Filter directives for the CLI flags alone.
///
/// A bare level (`info`) applies to both histfetch crates; anything with an
/// `=` is taken as a full directive string.
pub fn filter_directives(verbose: bool, log_level: Option<&str>) -> String {
    let level = match (log_level, verbose) {
        (Some(level), _) if level.contains('=') => return level.to_string(),
        (Some(level), _) => level,
        (None, true) => "debug",
        (None, false) => "warn",
    };
    CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. Fails if one is already set.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("HISTFETCH_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(verbose, log_level)));

    let registry = tracing_subscriber::registry().with(filter);
    let stderr = fmt::layer().with_writer(std::io::stderr).with_ansi(false);

    if log_json {
        registry
            .with(stderr.json().with_span_events(FmtSpan::NEW | FmtSpan::CLOSE))
            .try_init()?;
    } else {
        registry.with(stderr.compact().with_target(false)).try_init()?;
    }

    Ok(())
}
