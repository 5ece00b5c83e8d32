//! Activity log event entity model.

use adops_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

/// A row from the `events` table (append-only).
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Event {
    pub id: DbId,
    /// Dot-separated event name, e.g. `"campaign.published"`.
    pub event_type: String,
    pub source_entity_type: Option<String>,
    pub source_entity_id: Option<DbId>,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}
