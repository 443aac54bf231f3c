use std::collections::{BTreeMap, BTreeSet};

use super::{Collection, Group, GroupId, Item, ItemId, ItemState};
use crate::error::{FetchError, Result};
use crate::ids::{ReferenceId, TagPattern};
use crate::window::TimeRange;

/// In-memory collection, built up with chained `with_*` calls
#[derive(Debug, Clone, Default)]
pub struct MemoryCollection {
    reviews: Vec<(i64, ItemId)>,
    items: BTreeMap<ItemId, Item>,
    groups: BTreeMap<GroupId, Group>,
    day_cutoff_secs: i64,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a note with the given tags
    pub fn with_group<S: AsRef<str>>(mut self, group_id: GroupId, tags: &[S]) -> Self {
        self.groups.insert(
            group_id,
            Group {
                id: group_id,
                tags: tags.iter().map(|t| t.as_ref().to_string()).collect(),
            },
        );
        self
    }

    /// Add a card belonging to `group_id`
    pub fn with_item(
        mut self,
        item_id: ItemId,
        group_id: GroupId,
        state: ItemState,
        interval_days: u32,
    ) -> Self {
        self.items.insert(
            item_id,
            Item {
                id: item_id,
                group_id,
                state,
                interval_days,
            },
        );
        self
    }

    /// Record a review of `item_id` at `event_id` (epoch ms)
    pub fn with_review(mut self, event_id: i64, item_id: ItemId) -> Self {
        self.reviews.push((event_id, item_id));
        self
    }

    pub fn with_day_cutoff(mut self, day_cutoff_secs: i64) -> Self {
        self.day_cutoff_secs = day_cutoff_secs;
        self
    }
}

impl Collection for MemoryCollection {
    fn review_item_ids_in_range(&self, range: &TimeRange) -> Result<Vec<ItemId>> {
        let distinct: BTreeSet<ItemId> = self
            .reviews
            .iter()
            .filter(|(event_id, _)| range.contains(*event_id))
            .map(|(_, item_id)| *item_id)
            .collect();
        Ok(distinct.into_iter().collect())
    }

    fn resolve_item(&self, item_id: ItemId) -> Result<Item> {
        self.items
            .get(&item_id)
            .cloned()
            .ok_or_else(|| FetchError::not_found("card", item_id))
    }

    fn resolve_group(&self, group_id: GroupId) -> Result<Group> {
        self.groups
            .get(&group_id)
            .cloned()
            .ok_or_else(|| FetchError::not_found("note", group_id))
    }

    fn find_groups_by_tag(&self, pattern: &TagPattern, id: &ReferenceId) -> Result<Vec<GroupId>> {
        Ok(self
            .groups
            .values()
            .filter(|group| group.tags.iter().any(|tag| pattern.references(tag, id)))
            .map(|group| group.id)
            .collect())
    }

    fn day_cutoff(&self) -> Result<i64> {
        Ok(self.day_cutoff_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::DEFAULT_TAG_MARKER;

    #[test]
    fn test_reviews_are_distinct_and_windowed() {
        let col = MemoryCollection::new()
            .with_review(100, 1)
            .with_review(150, 1)
            .with_review(199, 2)
            .with_review(200, 3);

        let range = TimeRange {
            start_ms: 100,
            end_ms: 200,
        };
        assert_eq!(col.review_item_ids_in_range(&range).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_missing_records_are_errors() {
        let col = MemoryCollection::new();
        assert!(col.resolve_item(9).is_err());
        assert!(col.resolve_group(9).is_err());
        assert!(col.group_for_item(9).is_err());
    }

    #[test]
    fn test_find_groups_by_tag() {
        let pattern = TagPattern::new(DEFAULT_TAG_MARKER).unwrap();
        let col = MemoryCollection::new()
            .with_group(1, &["UWorld::Step1::12"])
            .with_group(2, &["UWorld::Step1::120"])
            .with_group(3, &["other", "uworld::step2::Renal::12"]);

        let id = ReferenceId::parse("12").unwrap();
        assert_eq!(col.find_groups_by_tag(&pattern, &id).unwrap(), vec![1, 3]);
    }
}
