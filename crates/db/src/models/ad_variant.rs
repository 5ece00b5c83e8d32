//! Ad variant (creative) entity model and DTOs.

use adops_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

/// A row from the `ad_variants` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct AdVariant {
    pub id: DbId,
    pub ad_set_id: DbId,
    pub name: String,
    pub headline: Option<String>,
    pub primary_text: Option<String>,
    pub call_to_action: Option<String>,
    pub landing_url: Option<String>,
    /// Creative pulled from the asset library; `None` for text-only drafts.
    pub asset_id: Option<DbId>,
    pub status: String,
    pub remote_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new ad variant under an ad set.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct CreateAdVariant {
    pub name: String,
    pub headline: Option<String>,
    pub primary_text: Option<String>,
    pub call_to_action: Option<String>,
    pub landing_url: Option<String>,
    pub asset_id: Option<DbId>,
}

/// DTO for updating an existing ad variant. All fields are optional.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct UpdateAdVariant {
    pub name: Option<String>,
    pub headline: Option<String>,
    pub primary_text: Option<String>,
    pub call_to_action: Option<String>,
    pub landing_url: Option<String>,
    pub asset_id: Option<DbId>,
    pub status: Option<String>,
}
