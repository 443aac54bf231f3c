//! Configuration type definitions

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ids::DEFAULT_TAG_MARKER;
use crate::seed::StateFilter;

/// Histfetch configuration (`config.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Marker token identifying question-bank tags
    #[serde(default = "default_tag_marker")]
    pub tag_marker: String,

    /// IDs per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Percentage of a batch drawn from horizontal results
    #[serde(default = "default_mix_percent")]
    pub mix_percent: u8,

    /// Horizontal search depth (layers)
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Enable horizontal (tag-graph) search
    #[serde(default)]
    pub horizontal: bool,

    /// Keep questions already answered correctly
    #[serde(default)]
    pub include_mastered: bool,

    /// Shuffle selection and output order
    #[serde(default)]
    pub randomize: bool,

    /// Default window for `--hours` without a value
    #[serde(default = "default_hours")]
    pub hours: u32,

    /// Local hour at which the scheduling day starts
    #[serde(default = "default_rollover_hour")]
    pub rollover_hour: u32,

    /// Card states that contribute seeds
    #[serde(default)]
    pub states: StateFilter,

    /// File locations
    #[serde(default)]
    pub paths: PathsConfig,
}

/// File locations; unset entries fall back to the data directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Host collection file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<PathBuf>,

    /// Blocklist of invalid IDs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_store: Option<PathBuf>,

    /// Mastered list maintained by another tool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastered_store: Option<PathBuf>,

    /// Saved session between commands
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<PathBuf>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            tag_marker: default_tag_marker(),
            batch_size: default_batch_size(),
            mix_percent: default_mix_percent(),
            max_depth: default_max_depth(),
            horizontal: false,
            include_mastered: false,
            randomize: false,
            hours: default_hours(),
            rollover_hour: default_rollover_hour(),
            states: StateFilter::default(),
            paths: PathsConfig::default(),
        }
    }
}

fn default_tag_marker() -> String {
    DEFAULT_TAG_MARKER.to_string()
}

fn default_batch_size() -> usize {
    40
}

fn default_mix_percent() -> u8 {
    50
}

fn default_max_depth() -> u32 {
    1
}

fn default_hours() -> u32 {
    4
}

fn default_rollover_hour() -> u32 {
    4
}
