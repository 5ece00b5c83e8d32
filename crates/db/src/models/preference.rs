//! Dashboard UI preference entity model and DTOs.

use adops_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

/// A row from the `ui_preferences` table.
///
/// The key namespace belongs to the frontend (`"campaigns.columns"`,
/// `"theme"`); the backend only guarantees one row per key.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct UiPreference {
    pub id: DbId,
    pub pref_key: String,
    pub value: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for setting a preference value.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct SetPreference {
    pub value: serde_json::Value,
}
