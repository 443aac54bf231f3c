//! Host collection access
//!
//! The review log, cards ("items") and notes ("groups") belong to the host
//! spaced-repetition application. The pipeline only reads them through the
//! [`Collection`] trait:
//! - [`MemoryCollection`] for tests and embedding callers
//! - [`AnkiCollection`] for a read-only Anki SQLite collection file

mod anki;
mod memory;

pub use anki::AnkiCollection;
pub use memory::MemoryCollection;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ids::{ReferenceId, TagPattern};
use crate::window::TimeRange;

/// Card identifier in the host collection
pub type ItemId = i64;

/// Note identifier in the host collection
pub type GroupId = i64;

/// Review interval (days) at which a card counts as mature
pub const MATURE_INTERVAL_DAYS: u32 = 21;

/// Current scheduling state of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    /// Learning or relearning
    Learning,
    /// Graduated review card
    Review,
    /// New, suspended, buried: never selected by any state filter
    Other,
}

/// Derived classification used by the state filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemClass {
    Learning,
    Young,
    Mature,
}

/// A card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub group_id: GroupId,
    pub state: ItemState,
    pub interval_days: u32,
}

impl Item {
    pub fn class(&self) -> Option<ItemClass> {
        match self.state {
            ItemState::Learning => Some(ItemClass::Learning),
            ItemState::Review if self.interval_days < MATURE_INTERVAL_DAYS => {
                Some(ItemClass::Young)
            }
            ItemState::Review => Some(ItemClass::Mature),
            ItemState::Other => None,
        }
    }
}

/// A note and its tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub tags: Vec<String>,
}

/// Read-only view of the host collection.
///
/// Per-record lookups are fallible; callers treat a failed lookup as a
/// soft skip of that record.
pub trait Collection {
    /// Distinct cards with a review event in `[start_ms, end_ms)`
    fn review_item_ids_in_range(&self, range: &TimeRange) -> Result<Vec<ItemId>>;

    /// Current state of a card
    fn resolve_item(&self, item_id: ItemId) -> Result<Item>;

    /// Note that owns a card
    fn group_for_item(&self, item_id: ItemId) -> Result<GroupId> {
        Ok(self.resolve_item(item_id)?.group_id)
    }

    /// Tags of a note
    fn resolve_group(&self, group_id: GroupId) -> Result<Group>;

    /// Notes carrying a tag that references `id` under `pattern`
    fn find_groups_by_tag(&self, pattern: &TagPattern, id: &ReferenceId) -> Result<Vec<GroupId>>;

    /// Epoch seconds at which the current scheduling day ends
    fn day_cutoff(&self) -> Result<i64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(state: ItemState, interval_days: u32) -> Item {
        Item {
            id: 1,
            group_id: 1,
            state,
            interval_days,
        }
    }

    #[test]
    fn test_classification() {
        assert_eq!(
            item(ItemState::Learning, 40).class(),
            Some(ItemClass::Learning)
        );
        assert_eq!(item(ItemState::Review, 0).class(), Some(ItemClass::Young));
        assert_eq!(item(ItemState::Review, 20).class(), Some(ItemClass::Young));
        assert_eq!(item(ItemState::Review, 21).class(), Some(ItemClass::Mature));
        assert_eq!(item(ItemState::Other, 100).class(), None);
    }
}
