//! CLI commands for histfetch

pub mod block;
pub mod blocklist;
pub mod dispatch;
pub mod fetch;
pub mod helpers;
pub mod show;
