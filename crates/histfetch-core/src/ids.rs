//! Question-bank reference IDs and the tag grammar that carries them
//!
//! A reference ID is a run of decimal digits. It keeps its original digit
//! string for display, while equality, hashing and ordering use the integer
//! value, so `"012"` and `"12"` name the same question.
//!
//! Tag grammar (case-insensitive):
//!
//! ```text
//! <anything> MARKER <anything> "::Step" <anything> "::" DIGITS <end>
//! ```
//!
//! Only the trailing digit run is extracted. Tags from other hierarchies
//! under the same marker (for example `UWorld::Shelf::99`) do not match.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bail_invalid;
use crate::error::{FetchError, Result};

/// Marker token used when no other is configured
pub const DEFAULT_TAG_MARKER: &str = "UWorld";

/// Ordered set of reference IDs (ascending by integer value)
pub type IdSet = BTreeSet<ReferenceId>;

/// A numeric question identifier extracted from a tag or a text blob
#[derive(Debug, Clone)]
pub struct ReferenceId {
    digits: String,
    value: u64,
}

impl ReferenceId {
    /// Parse an all-digit string. Returns `None` for empty input, any
    /// non-digit character, or a value that does not fit in 64 bits.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value = s.parse::<u64>().ok()?;
        Some(Self {
            digits: s.to_string(),
            value,
        })
    }

    /// Original digit string, leading zeros preserved
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Integer value used for ordering and set membership
    pub fn value(&self) -> u64 {
        self.value
    }
}

impl PartialEq for ReferenceId {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for ReferenceId {}

impl Hash for ReferenceId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for ReferenceId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ReferenceId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl FromStr for ReferenceId {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| FetchError::invalid_value("question id", s))
    }
}

impl Serialize for ReferenceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.digits)
    }
}

impl<'de> Deserialize<'de> for ReferenceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ReferenceId::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid question id: {:?}", raw)))
    }
}

/// Compiled tag grammar for one marker token
#[derive(Debug, Clone)]
pub struct TagPattern {
    marker_lower: String,
    regex: Regex,
}

impl TagPattern {
    pub fn new(marker: &str) -> Result<Self> {
        let marker = marker.trim();
        if marker.is_empty() {
            bail_invalid!("tag marker", "(empty)");
        }
        let regex = Regex::new(&format!(r"(?i){}.*::Step.*::(\d+)$", regex::escape(marker)))
            .map_err(|e| FetchError::invalid_value("tag marker", e))?;
        Ok(Self {
            marker_lower: marker.to_lowercase(),
            regex,
        })
    }

    /// Extract the trailing ID from a single tag, if the tag matches
    pub fn extract(&self, tag: &str) -> Option<ReferenceId> {
        let caps = self.regex.captures(tag)?;
        ReferenceId::parse(caps.get(1)?.as_str())
    }

    /// Extract every ID carried by a sequence of tags
    pub fn extract_all<'a, I>(&self, tags: I) -> IdSet
    where
        I: IntoIterator<Item = &'a str>,
    {
        tags.into_iter().filter_map(|tag| self.extract(tag)).collect()
    }

    /// Loose lookup match: the tag contains the marker, a later `step`, and
    /// its last `::` segment is the same ID by integer value (`::012` and
    /// `::12` both reference 12). Mirrors a glob search `*MARKER*Step*::<id>`
    /// and does not re-validate the rest of the tag.
    pub fn references(&self, tag: &str, id: &ReferenceId) -> bool {
        let lower = tag.to_lowercase();
        let Some(marker_at) = lower.find(&self.marker_lower) else {
            return false;
        };
        let rest = &lower[marker_at + self.marker_lower.len()..];
        let Some(step_at) = rest.find("step") else {
            return false;
        };
        let tail = &rest[step_at + "step".len()..];
        tail.rsplit_once("::")
            .and_then(|(_, last)| ReferenceId::parse(last))
            .is_some_and(|found| found == *id)
    }
}

/// Every maximal run of ASCII digits in free text, no delimiter assumptions
pub fn digit_runs(text: &str) -> IdSet {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .filter_map(|run| {
            let id = ReferenceId::parse(run);
            if id.is_none() {
                tracing::debug!(run, "discarding digit run too large for an ID");
            }
            id
        })
        .collect()
}

/// Parse a stored ID list: comma or whitespace separated, non-numeric tokens ignored
pub fn parse_id_list(content: &str) -> IdSet {
    content
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(ReferenceId::parse)
        .collect()
}

/// Render an ID set the way the stores keep it: ascending, `", "` separated
pub fn format_id_list(ids: &IdSet) -> String {
    join_ids(ids.iter())
}

/// Join IDs with `", "` in iteration order
pub fn join_ids<'a, I>(ids: I) -> String
where
    I: IntoIterator<Item = &'a ReferenceId>,
{
    ids.into_iter()
        .map(ReferenceId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
