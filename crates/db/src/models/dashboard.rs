//! Dashboard aggregate view models.
//!
//! These are query projections, not table rows; they exist so the summary
//! endpoints can return typed shapes instead of ad-hoc JSON.

use adops_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

/// Campaign counts bucketed by status.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Aggregate budget per delivery platform, in minor currency units.
///
/// Sums the daily budgets of active ad sets grouped by platform; ad sets
/// inheriting the campaign budget contribute their campaign's `budget_cents`.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct PlatformBudget {
    pub platform: String,
    pub total_budget_cents: i64,
    pub ad_set_count: i64,
}

/// Headline numbers for the dashboard landing page.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct DashboardSummary {
    pub campaigns_total: i64,
    pub campaigns_by_status: Vec<StatusCount>,
    pub ad_sets_total: i64,
    pub ad_variants_total: i64,
    pub assets_total: i64,
    pub asset_folders_total: i64,
    pub integrations_connected: i64,
    /// When the newest successful Drive sync finished, across all folders.
    pub last_sync_at: Option<Timestamp>,
}
