//! Creative asset entity model.

use adops_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

/// A row from the `assets` table: one Drive file mirrored into the library.
///
/// Rows are written exclusively by folder syncs, never by API clients, so
/// there are no create/update DTOs here. Files that disappear from Drive are
/// kept with `is_removed = true` so ad variants referencing them stay intact.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Asset {
    pub id: DbId,
    pub folder_id: DbId,
    pub drive_file_id: String,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub web_view_url: Option<String>,
    pub drive_modified_at: Option<Timestamp>,
    pub is_removed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Drive file metadata as the sync routine hands it to the repository.
///
/// Built from the Drive API response; decoupled from the wire shape so the
/// connector crate and this crate can evolve independently.
#[derive(Debug, Clone)]
pub struct AssetUpsert {
    pub drive_file_id: String,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub web_view_url: Option<String>,
    pub drive_modified_at: Option<Timestamp>,
}
