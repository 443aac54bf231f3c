//! Arguments for the fetch command

use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct FetchArgs {
    /// Cards reviewed since the start of the scheduling day (default)
    #[arg(long, conflicts_with_all = ["hours", "since"])]
    pub today: bool,

    /// Cards reviewed in the last N hours (config `hours` when no value)
    #[arg(long, num_args = 0..=1, value_name = "N",
          value_parser = clap::value_parser!(u32).range(1..),
          conflicts_with = "since")]
    pub hours: Option<Option<u32>>,

    /// Window start, epoch milliseconds
    #[arg(long, requires = "until")]
    pub since: Option<i64>,

    /// Window end (exclusive), epoch milliseconds
    #[arg(long, requires = "since")]
    pub until: Option<i64>,

    /// Skip cards in learning
    #[arg(long)]
    pub no_learning: bool,

    /// Skip young review cards
    #[arg(long)]
    pub no_young: bool,

    /// Skip mature review cards
    #[arg(long)]
    pub no_mature: bool,

    /// Also pull in IDs that share notes with the reviewed ones
    #[arg(long)]
    pub horizontal: bool,

    /// Horizontal search depth
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub depth: Option<u32>,

    /// Percent of each batch drawn from horizontal results
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub mix: Option<u8>,

    /// IDs per batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Keep questions already answered correctly
    #[arg(long)]
    pub include_mastered: bool,

    /// Shuffle selection and order
    #[arg(long)]
    pub random: bool,

    /// Seed for --random (reproducible shuffles)
    #[arg(long, requires = "random")]
    pub seed: Option<u64>,

    /// Collection file (overrides config)
    #[arg(long)]
    pub collection: Option<PathBuf>,

    /// Mastered-ID list (overrides config)
    #[arg(long)]
    pub mastered: Option<PathBuf>,

    /// Invalid-ID store (overrides config)
    #[arg(long)]
    pub invalid_store: Option<PathBuf>,
}
