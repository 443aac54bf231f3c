//! Seed extraction: reviewed cards → kept notes → tagged question IDs

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::collection::{Collection, GroupId, Item, ItemClass};
use crate::error::Result;
use crate::ids::{IdSet, TagPattern};
use crate::window::TimeRange;

/// Which card classes contribute seeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateFilter {
    #[serde(default = "default_true")]
    pub learning: bool,
    #[serde(default = "default_true")]
    pub young: bool,
    #[serde(default = "default_true")]
    pub mature: bool,
}

fn default_true() -> bool {
    true
}

impl Default for StateFilter {
    fn default() -> Self {
        Self {
            learning: true,
            young: true,
            mature: true,
        }
    }
}

impl StateFilter {
    /// First match wins: learning, then young, then mature
    pub fn keeps(&self, item: &Item) -> bool {
        match item.class() {
            Some(ItemClass::Learning) if self.learning => true,
            Some(ItemClass::Young) if self.young => true,
            Some(ItemClass::Mature) if self.mature => true,
            _ => false,
        }
    }
}

/// Seed IDs plus the stage counts needed to explain an empty result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Distinct cards reviewed in the window
    pub reviewed_items: usize,
    /// Notes whose card passed the state filter
    pub kept_groups: usize,
    pub ids: IdSet,
}

/// Collect question IDs from notes of cards reviewed in `range`.
///
/// Cards or notes that fail to resolve are skipped.
#[tracing::instrument(
    skip(collection, pattern),
    fields(start_ms = range.start_ms, end_ms = range.end_ms)
)]
pub fn extract_seeds(
    collection: &dyn Collection,
    pattern: &TagPattern,
    range: &TimeRange,
    filter: &StateFilter,
) -> Result<SeedReport> {
    let item_ids = collection.review_item_ids_in_range(range)?;
    if item_ids.is_empty() {
        return Ok(SeedReport::default());
    }

    let mut kept: BTreeSet<GroupId> = BTreeSet::new();
    for item_id in &item_ids {
        let item = match collection.resolve_item(*item_id) {
            Ok(item) => item,
            Err(e) => {
                tracing::debug!(item_id, error = %e, "skipping unresolvable card");
                continue;
            }
        };
        if filter.keeps(&item) {
            kept.insert(item.group_id);
        }
    }

    let mut ids = IdSet::new();
    for group_id in &kept {
        match collection.resolve_group(*group_id) {
            Ok(group) => ids.extend(pattern.extract_all(group.tags.iter().map(String::as_str))),
            Err(e) => tracing::debug!(group_id, error = %e, "skipping unresolvable note"),
        }
    }

    tracing::debug!(
        reviewed = item_ids.len(),
        kept_groups = kept.len(),
        seeds = ids.len(),
        "extracted seeds"
    );

    Ok(SeedReport {
        reviewed_items: item_ids.len(),
        kept_groups: kept.len(),
        ids,
    })
}
