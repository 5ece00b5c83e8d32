//! Folder sync run entity model.

use adops_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

/// A row from the `sync_runs` table: one attempt to mirror a Drive folder.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct SyncRun {
    pub id: DbId,
    pub folder_id: DbId,
    /// `manual` (API request) or `auto` (background scheduler).
    pub triggered_by: String,
    pub status: String,
    pub files_seen: i32,
    pub files_imported: i32,
    pub files_updated: i32,
    pub files_removed: i32,
    pub error: Option<String>,
    pub started_at: Timestamp,
    pub finished_at: Option<Timestamp>,
}

/// Counters accumulated while a sync run walks a folder listing.
#[derive(Debug, Clone, Copy, Default, Serialize, TS)]
#[ts(export)]
pub struct SyncCounts {
    pub seen: i32,
    pub imported: i32,
    pub updated: i32,
    pub removed: i32,
}
