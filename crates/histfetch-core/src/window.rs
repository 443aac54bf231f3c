//! Review window resolution
//!
//! Turns the user's timeframe choice into a half-open millisecond interval
//! `[start_ms, end_ms)` over review-log IDs (which double as timestamps).

use chrono::{DateTime, Duration, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::{FetchError, Result};

const MS_PER_HOUR: i64 = 3_600_000;
const SECS_PER_DAY: i64 = 86_400;

/// User-selected timeframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ReviewWindow {
    /// From the start of the current scheduling day through now
    Today,
    /// The last `n` hours through now
    LastHours { hours: u32 },
    /// Explicit bounds in epoch milliseconds
    Range { start_ms: i64, end_ms: i64 },
}

/// Concrete half-open interval in epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl TimeRange {
    /// A range with `start >= end` contains nothing
    pub fn is_empty(&self) -> bool {
        self.start_ms >= self.end_ms
    }

    pub fn contains(&self, ms: i64) -> bool {
        self.start_ms <= ms && ms < self.end_ms
    }
}

impl ReviewWindow {
    /// Resolve against the current time and the scheduler's day cutoff.
    ///
    /// `day_cutoff_secs` is the epoch-seconds timestamp at which the current
    /// scheduling day ends, so "today" starts one day before it.
    pub fn resolve(&self, now_ms: i64, day_cutoff_secs: i64) -> TimeRange {
        match *self {
            ReviewWindow::Today => TimeRange {
                start_ms: (day_cutoff_secs - SECS_PER_DAY) * 1000,
                end_ms: now_ms,
            },
            ReviewWindow::LastHours { hours } => TimeRange {
                start_ms: now_ms - i64::from(hours) * MS_PER_HOUR,
                end_ms: now_ms,
            },
            // Degenerate ranges are accepted and simply match no events
            ReviewWindow::Range { start_ms, end_ms } => TimeRange { start_ms, end_ms },
        }
    }
}

/// Epoch seconds of the next day rollover at `rollover_hour` local time,
/// strictly after `now`
pub fn next_day_cutoff<Tz: TimeZone>(now: &DateTime<Tz>, rollover_hour: u32) -> Result<i64> {
    let naive = now
        .date_naive()
        .and_hms_opt(rollover_hour, 0, 0)
        .ok_or_else(|| FetchError::invalid_value("rollover hour", rollover_hour))?;
    // A rollover inside a DST gap falls back to one hour later
    let cutoff = now
        .timezone()
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            now.timezone()
                .from_local_datetime(&(naive + Duration::hours(1)))
                .earliest()
        })
        .ok_or_else(|| FetchError::invalid_value("rollover hour", rollover_hour))?;

    let cutoff = if cutoff <= *now {
        cutoff + Duration::days(1)
    } else {
        cutoff
    };
    Ok(cutoff.timestamp())
}
