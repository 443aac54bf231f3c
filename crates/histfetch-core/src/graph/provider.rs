use crate::collection::Collection;
use crate::ids::{IdSet, ReferenceId, TagPattern};

/// Trait for providing ID adjacency
pub trait AdjacencyProvider {
    /// Every ID found on notes that reference `id`. May include `id` itself.
    fn neighbors(&self, id: &ReferenceId) -> IdSet;
}

/// Adjacency through shared notes in a host collection
pub struct TagAdjacency<'a> {
    collection: &'a dyn Collection,
    pattern: &'a TagPattern,
}

impl<'a> TagAdjacency<'a> {
    pub fn new(collection: &'a dyn Collection, pattern: &'a TagPattern) -> Self {
        Self {
            collection,
            pattern,
        }
    }
}

impl AdjacencyProvider for TagAdjacency<'_> {
    fn neighbors(&self, id: &ReferenceId) -> IdSet {
        let group_ids = match self.collection.find_groups_by_tag(self.pattern, id) {
            Ok(group_ids) => group_ids,
            Err(e) => {
                tracing::debug!(id = %id, error = %e, "tag lookup failed, no neighbors");
                return IdSet::new();
            }
        };

        let mut ids = IdSet::new();
        for group_id in group_ids {
            match self.collection.resolve_group(group_id) {
                Ok(group) => ids.extend(
                    self.pattern
                        .extract_all(group.tags.iter().map(String::as_str)),
                ),
                Err(e) => tracing::debug!(group_id, error = %e, "skipping unresolvable note"),
            }
        }
        ids
    }
}
