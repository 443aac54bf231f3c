//! Blocking IDs reported as invalid by the question bank
//!
//! The user pastes whatever error text the question bank showed. Every digit
//! run in it is treated as a bad ID: it is appended to the durable blocklist
//! and removed from the list currently on screen. The two effects are
//! independent; a failed write still removes the IDs from the list.

use crate::exclusion::ExclusionStore;
use crate::ids::{digit_runs, IdSet, ReferenceId};

/// Outcome of applying an error report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOutcome {
    /// The input list without the blocked IDs, order preserved
    pub list: Vec<ReferenceId>,
    pub removed_count: usize,
    /// IDs found in the error text
    pub blocked: IdSet,
    /// Whether `blocked` reached the durable blocklist
    pub persisted: bool,
}

impl BlockOutcome {
    /// The error text held no digits; nothing was changed
    pub fn is_no_match(&self) -> bool {
        self.blocked.is_empty()
    }
}

/// Parse `error_text`, persist the IDs it names, and drop them from `current`
#[tracing::instrument(skip_all, fields(current = current.len()))]
pub fn apply_error_report(
    error_text: &str,
    current: &[ReferenceId],
    store: &ExclusionStore,
) -> BlockOutcome {
    let blocked = digit_runs(error_text);
    if blocked.is_empty() {
        tracing::debug!("no digit runs in error text");
        return BlockOutcome {
            list: current.to_vec(),
            removed_count: 0,
            blocked,
            persisted: false,
        };
    }

    let persisted = match store.save_invalid(&blocked) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "could not persist blocked ids");
            false
        }
    };

    let list: Vec<ReferenceId> = current
        .iter()
        .filter(|id| !blocked.contains(*id))
        .cloned()
        .collect();
    let removed_count = current.len() - list.len();

    tracing::debug!(blocked = blocked.len(), removed_count, persisted, "applied error report");

    BlockOutcome {
        list,
        removed_count,
        blocked,
        persisted,
    }
}
