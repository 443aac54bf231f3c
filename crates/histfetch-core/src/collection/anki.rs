//! Read-only adapter over an Anki collection file
//!
//! Only three tables are consulted:
//! - `revlog(id, cid)`: review events, `id` is the epoch-ms timestamp
//! - `cards(id, nid, queue, ivl)`: current scheduling state
//! - `notes(id, tags)`: space-separated tag string
//!
//! The connection is opened read-only, so the host's scheduling state can
//! never be written from here.

use std::path::Path;

use chrono::Local;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

use super::{Collection, Group, GroupId, Item, ItemId, ItemState};
use crate::error::{FetchError, Result};
use crate::ids::{ReferenceId, TagPattern};
use crate::map_db_err;
use crate::window::{next_day_cutoff, TimeRange};

/// Anki card queue codes
const QUEUE_LEARNING: i64 = 1;
const QUEUE_REVIEW: i64 = 2;
const QUEUE_DAY_LEARNING: i64 = 3;

/// Anki collection opened read-only
#[derive(Debug)]
pub struct AnkiCollection {
    conn: Connection,
    rollover_hour: u32,
}

impl AnkiCollection {
    /// Open the collection at `path`. `rollover_hour` is the local hour at
    /// which the scheduling day starts (Anki's default is 4).
    pub fn open(path: &Path, rollover_hour: u32) -> Result<Self> {
        if !path.exists() {
            return Err(FetchError::CollectionNotFound {
                path: path.to_path_buf(),
            });
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| FetchError::io_operation("open collection", path.display(), e))?;

        tracing::debug!(path = %path.display(), rollover_hour, "opened collection");
        Ok(Self {
            conn,
            rollover_hour,
        })
    }

    /// Wrap an existing connection (tests build fixtures in memory)
    pub fn from_connection(conn: Connection, rollover_hour: u32) -> Self {
        Self {
            conn,
            rollover_hour,
        }
    }
}

fn queue_state(queue: i64) -> ItemState {
    match queue {
        QUEUE_LEARNING | QUEUE_DAY_LEARNING => ItemState::Learning,
        QUEUE_REVIEW => ItemState::Review,
        _ => ItemState::Other,
    }
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

impl Collection for AnkiCollection {
    #[tracing::instrument(skip(self), fields(start_ms = range.start_ms, end_ms = range.end_ms))]
    fn review_item_ids_in_range(&self, range: &TimeRange) -> Result<Vec<ItemId>> {
        if range.is_empty() {
            return Ok(Vec::new());
        }

        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT cid FROM revlog WHERE id >= ?1 AND id < ?2 ORDER BY cid")
            .map_err(|e| map_db_err!("prepare revlog query", e))?;

        let rows = stmt
            .query_map(params![range.start_ms, range.end_ms], |row| {
                row.get::<_, i64>(0)
            })
            .map_err(|e| map_db_err!("query revlog", e))?;

        let mut item_ids = Vec::new();
        for row in rows {
            item_ids.push(row.map_err(|e| map_db_err!("read revlog row", e))?);
        }
        Ok(item_ids)
    }

    fn resolve_item(&self, item_id: ItemId) -> Result<Item> {
        let row = self
            .conn
            .query_row(
                "SELECT nid, queue, ivl FROM cards WHERE id = ?1",
                params![item_id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, i64>(2)?,
                    ))
                },
            )
            .optional()
            .map_err(|e| map_db_err!("read card", e))?;

        let (group_id, queue, ivl) = row.ok_or_else(|| FetchError::not_found("card", item_id))?;
        Ok(Item {
            id: item_id,
            group_id,
            state: queue_state(queue),
            interval_days: u32::try_from(ivl.max(0)).unwrap_or(u32::MAX),
        })
    }

    fn resolve_group(&self, group_id: GroupId) -> Result<Group> {
        let tags: Option<String> = self
            .conn
            .query_row(
                "SELECT tags FROM notes WHERE id = ?1",
                params![group_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| map_db_err!("read note", e))?;

        let tags = tags.ok_or_else(|| FetchError::not_found("note", group_id))?;
        Ok(Group {
            id: group_id,
            tags: split_tags(&tags),
        })
    }

    fn find_groups_by_tag(&self, pattern: &TagPattern, id: &ReferenceId) -> Result<Vec<GroupId>> {
        // LIKE narrows to candidate notes; the tag grammar decides
        let mut stmt = self
            .conn
            .prepare("SELECT id, tags FROM notes WHERE tags LIKE ?1 ORDER BY id")
            .map_err(|e| map_db_err!("prepare tag query", e))?;

        let rows = stmt
            .query_map(params![format!("%{}%", id.value())], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| map_db_err!("query notes by tag", e))?;

        let mut group_ids = Vec::new();
        for row in rows {
            let (group_id, tags) = match row {
                Ok(row) => row,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable note row");
                    continue;
                }
            };
            if tags
                .split_whitespace()
                .any(|tag| pattern.references(tag, id))
            {
                group_ids.push(group_id);
            }
        }
        Ok(group_ids)
    }

    fn day_cutoff(&self) -> Result<i64> {
        next_day_cutoff(&Local::now(), self.rollover_hour)
    }
}
