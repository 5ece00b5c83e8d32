//! Campaign entity model and DTOs.

use adops_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

/// A row from the `campaigns` table.
///
/// `remote_ids` maps a provider slug (`"meta_ads"`, `"tiktok_ads"`) to the
/// campaign id the platform assigned when the campaign was published there.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Campaign {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub objective: String,
    pub status: String,
    /// Daily budget in minor currency units (cents); `None` leaves spend uncapped.
    pub budget_cents: Option<i64>,
    pub currency: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub remote_ids: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new campaign.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct CreateCampaign {
    pub name: String,
    pub description: Option<String>,
    /// One of `awareness`, `traffic`, `conversions`, `engagement`.
    pub objective: String,
    pub budget_cents: Option<i64>,
    /// ISO 4217 code. Defaults to `USD` if omitted.
    pub currency: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// DTO for updating an existing campaign. All fields are optional.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct UpdateCampaign {
    pub name: Option<String>,
    pub description: Option<String>,
    pub objective: Option<String>,
    pub status: Option<String>,
    pub budget_cents: Option<i64>,
    pub currency: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
