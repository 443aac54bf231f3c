//! Interactive session over one run's results
//!
//! Holds every ID the last run found, the unselected overflow, and the
//! batch size used for display. Commands after a fetch (blocking bad IDs,
//! topping the list back up, re-displaying) all operate on this object.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::blocklist::{apply_error_report, BlockOutcome};
use crate::error::{FetchError, Result};
use crate::exclusion::ExclusionStore;
use crate::format::render_batches;
use crate::ids::ReferenceId;
use crate::mixer::{chunk, Batch, Selection, SelectionStats};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchSession {
    pub created_at: DateTime<Utc>,
    pub batch_size: usize,
    /// All found IDs, in display order
    pub ids: Vec<ReferenceId>,
    /// Unselected remainder kept for later recall
    #[serde(default)]
    pub overflow: Vec<ReferenceId>,
    #[serde(default)]
    pub stats: SelectionStats,
}

impl FetchSession {
    pub fn from_selection(
        selection: Selection,
        batch_size: usize,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            created_at,
            batch_size,
            ids: selection.selected,
            overflow: selection.overflow,
            stats: selection.stats,
        }
    }

    pub fn batches(&self) -> Vec<Batch> {
        chunk(&self.ids, self.batch_size)
    }

    pub fn render(&self) -> String {
        render_batches(&self.ids, self.batch_size)
    }

    /// Apply a pasted error report to the session list. Blocked IDs are
    /// also dropped from the overflow so a later refill cannot bring them
    /// back.
    pub fn remove_bad_ids(&mut self, error_text: &str, store: &ExclusionStore) -> BlockOutcome {
        let outcome = apply_error_report(error_text, &self.ids, store);
        if !outcome.is_no_match() {
            self.ids = outcome.list.clone();
            self.overflow.retain(|id| !outcome.blocked.contains(id));
        }
        outcome
    }

    /// Move overflow IDs (in stored order) into the list until it holds
    /// `batch_size` IDs or the overflow runs out. Returns how many moved.
    pub fn refill(&mut self) -> usize {
        let wanted = self.batch_size.saturating_sub(self.ids.len());
        let moved = wanted.min(self.overflow.len());
        self.ids.extend(self.overflow.drain(..moved));
        moved
    }

    /// Load a saved session
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(FetchError::NoSession),
            Err(e) => return Err(FetchError::io_operation("read session", path.display(), e)),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| FetchError::io_operation("create directory", parent.display(), e))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .map_err(|e| FetchError::io_operation("write session", path.display(), e))?;
        Ok(())
    }
}
