//! Exclusion lists: known-invalid IDs (owned here) and mastered IDs (owned
//! by another tool, read-only)
//!
//! Both lists share one text format: decimal IDs separated by commas and/or
//! whitespace. The invalid list is rewritten sorted by integer value and
//! only ever grows.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{FetchError, Result};
use crate::ids::{format_id_list, parse_id_list, IdSet};

/// Source of the externally maintained "mastered" list
pub trait MasteredSource {
    /// Snapshot of the list. Unavailable sources yield an empty set.
    fn load_mastered(&self) -> IdSet;
}

/// Mastered list read from a text file written by another tool
#[derive(Debug, Clone, Default)]
pub struct FileMasteredSource {
    path: Option<PathBuf>,
}

impl FileMasteredSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl MasteredSource for FileMasteredSource {
    fn load_mastered(&self) -> IdSet {
        match &self.path {
            Some(path) => load_lenient(path, "mastered"),
            None => IdSet::new(),
        }
    }
}

impl MasteredSource for IdSet {
    fn load_mastered(&self) -> IdSet {
        self.clone()
    }
}

/// Invalid-ID blocklist plus an injected mastered list
pub struct ExclusionStore {
    invalid_path: PathBuf,
    mastered: Box<dyn MasteredSource>,
}

impl std::fmt::Debug for ExclusionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExclusionStore")
            .field("invalid_path", &self.invalid_path)
            .finish_non_exhaustive()
    }
}

impl ExclusionStore {
    pub fn new(invalid_path: impl Into<PathBuf>, mastered: impl MasteredSource + 'static) -> Self {
        Self {
            invalid_path: invalid_path.into(),
            mastered: Box::new(mastered),
        }
    }

    pub fn invalid_path(&self) -> &Path {
        &self.invalid_path
    }

    /// Current blocklist; unreadable storage reads as empty
    pub fn load_invalid(&self) -> IdSet {
        load_lenient(&self.invalid_path, "invalid")
    }

    /// Merge `new_ids` into the blocklist and write it back sorted.
    ///
    /// Saving the same IDs twice leaves the file unchanged. If the existing
    /// file cannot be read, nothing is written, so stored IDs are never lost.
    #[tracing::instrument(
        skip(self, new_ids),
        fields(path = %self.invalid_path.display(), new = new_ids.len())
    )]
    pub fn save_invalid(&self, new_ids: &IdSet) -> Result<()> {
        if new_ids.is_empty() {
            return Ok(());
        }

        let mut merged = read_id_file(&self.invalid_path)?;
        let before = merged.len();
        merged.extend(new_ids.iter().cloned());

        if let Some(parent) = self.invalid_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    FetchError::io_operation("create directory", parent.display(), e)
                })?;
            }
        }

        fs::write(&self.invalid_path, format_id_list(&merged)).map_err(|e| {
            FetchError::io_operation("write blocklist", self.invalid_path.display(), e)
        })?;

        tracing::debug!(added = merged.len() - before, total = merged.len(), "saved blocklist");
        Ok(())
    }

    pub fn load_mastered(&self) -> IdSet {
        self.mastered.load_mastered()
    }
}

/// Read an ID file; a missing file is an empty set
fn read_id_file(path: &Path) -> Result<IdSet> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(parse_id_list(&content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(IdSet::new()),
        Err(e) => Err(FetchError::io_operation("read id list", path.display(), e)),
    }
}

fn load_lenient(path: &Path, list: &str) -> IdSet {
    match read_id_file(path) {
        Ok(ids) => ids,
        Err(e) => {
            tracing::warn!(list, error = %e, "unreadable id list, treating as empty");
            IdSet::new()
        }
    }
}
