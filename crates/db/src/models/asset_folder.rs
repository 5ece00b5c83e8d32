//! Watched Drive folder entity model and DTOs.

use adops_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

/// A row from the `asset_folders` table.
///
/// Each row tracks one Google Drive folder the asset library mirrors.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct AssetFolder {
    pub id: DbId,
    pub name: String,
    pub drive_folder_id: String,
    pub auto_sync: bool,
    /// Minimum seconds between automatic syncs of this folder.
    pub sync_interval_secs: i32,
    pub last_synced_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a Drive folder with the asset library.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct CreateAssetFolder {
    pub name: String,
    pub drive_folder_id: String,
    pub auto_sync: Option<bool>,
    pub sync_interval_secs: Option<i32>,
}

/// DTO for updating a watched folder. All fields are optional.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct UpdateAssetFolder {
    pub name: Option<String>,
    pub auto_sync: Option<bool>,
    pub sync_interval_secs: Option<i32>,
}
