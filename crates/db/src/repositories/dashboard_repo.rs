//! Aggregate queries behind the dashboard widgets.
//!
//! These are read-only projections over the campaign hierarchy, the asset
//! library, and the integrations table; no rows are written here.

use sqlx::PgPool;

use crate::models::dashboard::{DashboardSummary, PlatformBudget, StatusCount};
use crate::repositories::{AssetRepo, IntegrationRepo, SyncRunRepo};

/// Provides the dashboard widget projections.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Headline counts for the dashboard landing page.
    pub async fn summary(pool: &PgPool) -> Result<DashboardSummary, sqlx::Error> {
        let campaigns_total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM campaigns")
            .fetch_one(pool)
            .await?;

        let campaigns_by_status = sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM campaigns GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await?;

        let ad_sets_total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ad_sets")
            .fetch_one(pool)
            .await?;

        let ad_variants_total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ad_variants")
            .fetch_one(pool)
            .await?;

        let asset_folders_total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM asset_folders")
            .fetch_one(pool)
            .await?;

        let assets_total = AssetRepo::count_live(pool).await?;
        let integrations_connected = IntegrationRepo::count_connected(pool).await?;
        let last_sync_at = SyncRunRepo::last_succeeded_at(pool).await?;

        Ok(DashboardSummary {
            campaigns_total,
            campaigns_by_status,
            ad_sets_total,
            ad_variants_total,
            assets_total,
            asset_folders_total,
            integrations_connected,
            last_sync_at,
        })
    }

    /// Daily budget totals of active ad sets grouped by delivery platform.
    ///
    /// An ad set without its own budget contributes its campaign's budget;
    /// ad sets where both are NULL contribute zero but are still counted.
    pub async fn budget_by_platform(pool: &PgPool) -> Result<Vec<PlatformBudget>, sqlx::Error> {
        sqlx::query_as::<_, PlatformBudget>(
            "SELECT s.platform, \
                    COALESCE(SUM(COALESCE(s.budget_cents, c.budget_cents, 0)), 0)::BIGINT \
                        AS total_budget_cents, \
                    COUNT(*) AS ad_set_count \
             FROM ad_sets s \
             JOIN campaigns c ON c.id = s.campaign_id \
             WHERE s.status = 'active' \
             GROUP BY s.platform \
             ORDER BY s.platform",
        )
        .fetch_all(pool)
        .await
    }
}
