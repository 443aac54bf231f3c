//! Output format handling for histfetch
//!
//! - human: batch listing ready to paste into the question bank
//! - json: stable, machine-readable JSON

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::ids::{join_ids, ReferenceId};
use crate::mixer::{chunk, Batch};

/// Output format for histfetch commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(FetchError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Header line for one batch
pub fn batch_header(batch: &Batch) -> String {
    format!("--- Batch {} ({} IDs) ---", batch.number, batch.ids.len())
}

/// Render `ids` as consecutive batches, each a header line, the IDs joined
/// by `", "`, and a blank line
pub fn render_batches(ids: &[ReferenceId], batch_size: usize) -> String {
    if ids.is_empty() {
        return "No IDs remaining.".to_string();
    }

    let mut lines = Vec::new();
    for batch in chunk(ids, batch_size) {
        lines.push(batch_header(&batch));
        lines.push(join_ids(&batch.ids));
        lines.push(String::new());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: u64) -> Vec<ReferenceId> {
        (1..=n)
            .filter_map(|i| ReferenceId::parse(&i.to_string()))
            .collect()
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(
            "human".parse::<OutputFormat>().unwrap(),
            OutputFormat::Human
        );
        assert!(matches!(
            "yaml".parse::<OutputFormat>(),
            Err(FetchError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_render_batches() {
        let text = render_batches(&ids(5), 2);
        assert_eq!(
            text,
            "--- Batch 1 (2 IDs) ---\n1, 2\n\n\
             --- Batch 2 (2 IDs) ---\n3, 4\n\n\
             --- Batch 3 (1 IDs) ---\n5\n"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_batches(&[], 40), "No IDs remaining.");
    }
}
