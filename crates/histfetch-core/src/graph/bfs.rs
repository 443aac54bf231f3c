use std::time::Instant;

use crate::graph::AdjacencyProvider;
use crate::ids::IdSet;
use crate::trace_time;

/// Result of a layered expansion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    /// IDs discovered across all layers, seed excluded
    pub horizontal: IdSet,
    /// Number of new IDs contributed by each layer that found any
    pub layers: Vec<usize>,
}

impl Expansion {
    pub fn depth_reached(&self) -> usize {
        self.layers.len()
    }
}

/// Breadth-first expansion of `seed` for at most `max_depth` layers.
///
/// Each layer queries only the IDs discovered by the previous one, so no ID
/// is expanded twice. Stops early as soon as a layer finds nothing new.
#[tracing::instrument(skip(provider, seed), fields(seeds = seed.len(), max_depth))]
pub fn expand(provider: &dyn AdjacencyProvider, seed: &IdSet, max_depth: u32) -> Expansion {
    let start = Instant::now();
    let mut seen = seed.clone();
    let mut frontier = seed.clone();
    let mut layers = Vec::new();

    for depth in 1..=max_depth {
        let mut discovered = IdSet::new();
        for id in &frontier {
            discovered.extend(
                provider
                    .neighbors(id)
                    .into_iter()
                    .filter(|neighbor| !seen.contains(neighbor)),
            );
        }

        if discovered.is_empty() {
            tracing::debug!(depth, "expansion converged");
            break;
        }

        tracing::debug!(depth, new_ids = discovered.len(), "expanded layer");
        layers.push(discovered.len());
        seen.extend(discovered.iter().cloned());
        frontier = discovered;
    }

    let horizontal: IdSet = seen.difference(seed).cloned().collect();
    trace_time!(start, "expand", horizontal = horizontal.len());

    Expansion { horizontal, layers }
}
