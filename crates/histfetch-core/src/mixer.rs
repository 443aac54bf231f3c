//! Exclusion filtering, proportional mixing and batch chunking
//!
//! With horizontal search enabled the batch is split into a direct quota and
//! a horizontal quota (`mix_percent` of the batch, rounded down). A pool that
//! cannot fill its quota hands the shortfall to the other pool. The direct
//! shortfall is settled first, then the horizontal one.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ids::{IdSet, ReferenceId};

/// Direct seeds and horizontally discovered IDs (disjoint)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePool {
    pub direct: IdSet,
    pub horizontal: IdSet,
}

/// Snapshot of both exclusion lists taken for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exclusions {
    pub invalid: IdSet,
    pub mastered: IdSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixOptions {
    pub batch_size: usize,
    /// Share of the batch reserved for horizontal IDs, 0..=100
    pub mix_percent: u8,
    pub randomize: bool,
    pub horizontal_enabled: bool,
    pub include_mastered: bool,
}

impl Default for MixOptions {
    fn default() -> Self {
        Self {
            batch_size: 40,
            mix_percent: 50,
            randomize: false,
            horizontal_enabled: false,
            include_mastered: false,
        }
    }
}

/// Informational counts; never influence selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionStats {
    pub direct_found: usize,
    pub horizontal_found: usize,
    pub mastered_removed: usize,
    pub invalid_removed: usize,
    pub direct_selected: usize,
    pub horizontal_selected: usize,
}

impl SelectionStats {
    /// e.g. "3 correct questions, 1 invalid questions"; `None` if nothing was removed
    pub fn removed_summary(&self) -> Option<String> {
        let mut parts = Vec::new();
        if self.mastered_removed > 0 {
            parts.push(format!("{} correct questions", self.mastered_removed));
        }
        if self.invalid_removed > 0 {
            parts.push(format!("{} invalid questions", self.invalid_removed));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Final ordered list, unselected remainder and counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub selected: Vec<ReferenceId>,
    pub overflow: Vec<ReferenceId>,
    pub stats: SelectionStats,
}

/// One display chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Batch {
    /// 1-based
    pub number: usize,
    pub ids: Vec<ReferenceId>,
}

fn filter_pool(
    pool: &IdSet,
    exclusions: &Exclusions,
    include_mastered: bool,
    stats: &mut SelectionStats,
) -> Vec<ReferenceId> {
    let mut kept = Vec::with_capacity(pool.len());
    for id in pool {
        if !include_mastered && exclusions.mastered.contains(id) {
            stats.mastered_removed += 1;
        } else if exclusions.invalid.contains(id) {
            stats.invalid_removed += 1;
        } else {
            kept.push(id.clone());
        }
    }
    kept
}

/// `floor(batch_size * percent / 100)` without overflowing for huge batch sizes
fn horizontal_quota(batch_size: usize, mix_percent: u8) -> usize {
    let percent = usize::from(mix_percent.min(100));
    batch_size / 100 * percent + batch_size % 100 * percent / 100
}

/// Filter both pools and build the final ordered list.
///
/// With `randomize` off the result is a pure function of the inputs: each
/// pool contributes in ascending order, direct first. With it on, which IDs
/// fill a quota and the final order come from `rng`.
pub fn select<R: Rng + ?Sized>(
    pool: &CandidatePool,
    exclusions: &Exclusions,
    opts: &MixOptions,
    rng: &mut R,
) -> Selection {
    let mut stats = SelectionStats::default();
    let mut direct = filter_pool(&pool.direct, exclusions, opts.include_mastered, &mut stats);
    stats.direct_found = pool.direct.len();

    if !opts.horizontal_enabled {
        if opts.randomize {
            direct.shuffle(rng);
        }
        stats.direct_selected = direct.len();
        return Selection {
            selected: direct,
            overflow: Vec::new(),
            stats,
        };
    }

    let mut horizontal =
        filter_pool(&pool.horizontal, exclusions, opts.include_mastered, &mut stats);
    stats.horizontal_found = pool.horizontal.len();

    if opts.randomize {
        direct.shuffle(rng);
        horizontal.shuffle(rng);
    }

    let target_h = horizontal_quota(opts.batch_size, opts.mix_percent);
    let target_d = opts.batch_size - target_h;

    let mut take_d = target_d.min(direct.len());
    let mut take_h = target_h.min(horizontal.len());

    let direct_shortfall = target_d - take_d;
    let horizontal_shortfall = target_h - take_h;
    take_h += direct_shortfall.min(horizontal.len() - take_h);
    take_d += horizontal_shortfall.min(direct.len() - take_d);

    let overflow_d = direct.split_off(take_d);
    let overflow_h = horizontal.split_off(take_h);
    stats.direct_selected = direct.len();
    stats.horizontal_selected = horizontal.len();

    let mut selected = direct;
    selected.extend(horizontal);

    let mut overflow = overflow_d;
    overflow.extend(overflow_h);

    if opts.randomize {
        selected.shuffle(rng);
        overflow.shuffle(rng);
    } else {
        overflow.sort();
    }

    tracing::debug!(
        target_direct = target_d,
        target_horizontal = target_h,
        direct = stats.direct_selected,
        horizontal = stats.horizontal_selected,
        overflow = overflow.len(),
        "mixed selection"
    );

    Selection {
        selected,
        overflow,
        stats,
    }
}

/// Split `ids` into consecutive display batches. A batch size of zero
/// yields a single batch.
pub fn chunk(ids: &[ReferenceId], batch_size: usize) -> Vec<Batch> {
    if ids.is_empty() {
        return Vec::new();
    }
    let size = if batch_size == 0 { ids.len() } else { batch_size };
    ids.chunks(size)
        .enumerate()
        .map(|(i, chunk)| Batch {
            number: i + 1,
            ids: chunk.to_vec(),
        })
        .collect()
}
