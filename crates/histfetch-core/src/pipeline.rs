//! One fetch run: window → seeds → expansion → filtering and mixing
//!
//! Stateless: every input comes in as a parameter and the result is
//! returned. Zero results at any stage is a normal [`RunOutcome::Empty`]
//! with the stage that produced it.

use std::fmt;
use std::time::Instant;

use rand::Rng;
use serde::Serialize;

use crate::collection::Collection;
use crate::error::Result;
use crate::exclusion::ExclusionStore;
use crate::graph::{expand, TagAdjacency};
use crate::ids::{IdSet, TagPattern};
use crate::mixer::{select, CandidatePool, Exclusions, MixOptions, Selection};
use crate::seed::{extract_seeds, StateFilter};
use crate::trace_time;
use crate::window::{ReviewWindow, TimeRange};

/// Everything a run needs besides the data sources
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub window: ReviewWindow,
    pub states: StateFilter,
    pub pattern: TagPattern,
    /// Layers of horizontal expansion (only used when horizontal is enabled)
    pub max_depth: u32,
    pub mix: MixOptions,
}

/// Why a run produced nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum EmptyReason {
    /// No review events in the window
    NoEvents,
    /// Cards were reviewed but none passed the state filter
    NoStateMatch,
    /// Kept notes carried no question-bank tags
    NoTaggedIds,
    /// Every candidate was removed by an exclusion list
    AllFiltered {
        mastered_removed: usize,
        invalid_removed: usize,
    },
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::NoEvents => {
                write!(f, "No cards reviewed in this timeframe (no events in window).")
            }
            EmptyReason::NoStateMatch => {
                write!(f, "Cards found, but none matched the state criteria.")
            }
            EmptyReason::NoTaggedIds => {
                write!(f, "Reviewed cards found, but they had no valid Step tags.")
            }
            EmptyReason::AllFiltered {
                mastered_removed,
                invalid_removed,
            } => {
                let mut parts = Vec::new();
                if *mastered_removed > 0 {
                    parts.push(format!("{} correct", mastered_removed));
                }
                if *invalid_removed > 0 {
                    parts.push(format!("{} invalid", invalid_removed));
                }
                if parts.is_empty() {
                    write!(f, "No Step IDs found.")
                } else {
                    write!(f, "All found questions were skipped! ({})", parts.join(", "))
                }
            }
        }
    }
}

/// A run that found IDs
#[derive(Debug, Clone, Serialize)]
pub struct FetchRun {
    pub range: TimeRange,
    pub seed_count: usize,
    /// Expansion layers that found new IDs (0 when horizontal is off)
    pub depth_reached: usize,
    pub selection: Selection,
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    Found(FetchRun),
    Empty(EmptyReason),
}

/// Run the full pipeline once.
///
/// Storage problems with the exclusion lists degrade to empty lists; only
/// failures of the collection's bulk queries are returned as errors.
#[tracing::instrument(
    skip_all,
    fields(window = ?request.window, horizontal = request.mix.horizontal_enabled)
)]
pub fn run<R: Rng + ?Sized>(
    collection: &dyn Collection,
    store: &ExclusionStore,
    request: &FetchRequest,
    now_ms: i64,
    rng: &mut R,
) -> Result<RunOutcome> {
    let start = Instant::now();

    let day_cutoff = match request.window {
        ReviewWindow::Today => collection.day_cutoff()?,
        _ => 0,
    };
    let range = request.window.resolve(now_ms, day_cutoff);

    let seeds = extract_seeds(collection, &request.pattern, &range, &request.states)?;
    trace_time!(start, "extract_seeds", seeds = seeds.ids.len());

    if seeds.reviewed_items == 0 {
        return Ok(RunOutcome::Empty(EmptyReason::NoEvents));
    }
    if seeds.kept_groups == 0 {
        return Ok(RunOutcome::Empty(EmptyReason::NoStateMatch));
    }
    if seeds.ids.is_empty() {
        return Ok(RunOutcome::Empty(EmptyReason::NoTaggedIds));
    }

    let (horizontal, depth_reached) = if request.mix.horizontal_enabled {
        let adjacency = TagAdjacency::new(collection, &request.pattern);
        let expansion = expand(&adjacency, &seeds.ids, request.max_depth);
        let depth = expansion.depth_reached();
        (expansion.horizontal, depth)
    } else {
        (IdSet::new(), 0)
    };

    let exclusions = Exclusions {
        invalid: store.load_invalid(),
        mastered: if request.mix.include_mastered {
            IdSet::new()
        } else {
            store.load_mastered()
        },
    };

    let seed_count = seeds.ids.len();
    let pool = CandidatePool {
        direct: seeds.ids,
        horizontal,
    };
    let selection = select(&pool, &exclusions, &request.mix, rng);
    trace_time!(start, "run", selected = selection.selected.len());

    if selection.selected.is_empty() && selection.overflow.is_empty() {
        return Ok(RunOutcome::Empty(EmptyReason::AllFiltered {
            mastered_removed: selection.stats.mastered_removed,
            invalid_removed: selection.stats.invalid_removed,
        }));
    }

    Ok(RunOutcome::Found(FetchRun {
        range,
        seed_count,
        depth_reached,
        selection,
    }))
}
