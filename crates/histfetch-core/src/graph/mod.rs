//! Tag-graph expansion
//!
//! Question IDs are adjacent when a note carries tags naming both:
//! - Adjacency provider trait for pluggable data sources
//! - Layered BFS that grows a seed set into a disjoint "horizontal" set

pub mod bfs;
pub mod provider;

pub use bfs::{expand, Expansion};
pub use provider::{AdjacencyProvider, TagAdjacency};
