//! Histfetch Core Library
//!
//! Turns recent review history from a spaced-repetition collection into
//! bounded batches of question-bank IDs: seed extraction, tag-graph
//! expansion, exclusion filtering and proportional mixing.

pub mod blocklist;
pub mod collection;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod format;
pub mod graph;
pub mod ids;
pub mod logging;
pub mod mixer;
pub mod pipeline;
pub mod seed;
pub mod session;
pub mod window;
