//! Shared helpers for command implementations

use std::io::Read;
use std::path::Path;

use histfetch_core::config::FetchConfig;
use histfetch_core::error::{FetchError, Result};
use histfetch_core::exclusion::{ExclusionStore, FileMasteredSource};

/// Exclusion store from config, with per-command path overrides
pub fn exclusion_store(
    config: &FetchConfig,
    invalid_override: Option<&Path>,
    mastered_override: Option<&Path>,
) -> Result<ExclusionStore> {
    let invalid = match invalid_override {
        Some(path) => path.to_path_buf(),
        None => config.invalid_store_path()?,
    };
    let mastered = mastered_override
        .map(Path::to_path_buf)
        .or_else(|| config.paths.mastered_store.clone());

    Ok(ExclusionStore::new(invalid, FileMasteredSource::new(mastered)))
}

pub fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn read_stdin() -> Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| FetchError::io_operation("read", "stdin", e))?;
    Ok(input)
}
