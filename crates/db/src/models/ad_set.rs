//! Ad set entity model and DTOs.

use adops_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

/// A row from the `ad_sets` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct AdSet {
    pub id: DbId,
    pub campaign_id: DbId,
    pub name: String,
    /// Delivery platform: `meta_ads` or `tiktok_ads`.
    pub platform: String,
    pub status: String,
    /// Daily budget in minor currency units; `None` inherits the campaign budget.
    pub budget_cents: Option<i64>,
    /// Free-form targeting description (age ranges, geos, interests).
    pub audience: serde_json::Value,
    /// Id assigned by the delivery platform once published.
    pub remote_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new ad set under a campaign.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct CreateAdSet {
    pub name: String,
    pub platform: String,
    pub budget_cents: Option<i64>,
    pub audience: Option<serde_json::Value>,
}

/// DTO for updating an existing ad set. All fields are optional.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct UpdateAdSet {
    pub name: Option<String>,
    pub status: Option<String>,
    pub budget_cents: Option<i64>,
    pub audience: Option<serde_json::Value>,
}
