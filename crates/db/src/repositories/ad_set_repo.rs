//! Repository for the `ad_sets` table.

use adops_core::types::DbId;
use sqlx::PgPool;

use crate::models::ad_set::{AdSet, CreateAdSet, UpdateAdSet};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, campaign_id, name, platform, status, budget_cents, audience, \
     remote_id, created_at, updated_at";

/// Provides CRUD operations for ad sets.
pub struct AdSetRepo;

impl AdSetRepo {
    /// Insert a new ad set under the given campaign, returning the created row.
    pub async fn create(
        pool: &PgPool,
        campaign_id: DbId,
        input: &CreateAdSet,
    ) -> Result<AdSet, sqlx::Error> {
        let query = format!(
            "INSERT INTO ad_sets (campaign_id, name, platform, budget_cents, audience)
             VALUES ($1, $2, $3, $4, COALESCE($5, '{{}}'::jsonb))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdSet>(&query)
            .bind(campaign_id)
            .bind(&input.name)
            .bind(&input.platform)
            .bind(input.budget_cents)
            .bind(&input.audience)
            .fetch_one(pool)
            .await
    }

    /// Find an ad set by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AdSet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ad_sets WHERE id = $1");
        sqlx::query_as::<_, AdSet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the ad sets of one campaign, oldest-first for stable display.
    pub async fn list_by_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<AdSet>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM ad_sets WHERE campaign_id = $1 ORDER BY created_at");
        sqlx::query_as::<_, AdSet>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }

    /// Update an ad set. Only non-`None` fields in `input` are applied.
    ///
    /// The platform is fixed at creation; changing it would orphan any
    /// already-published remote objects.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdSet,
    ) -> Result<Option<AdSet>, sqlx::Error> {
        let query = format!(
            "UPDATE ad_sets SET
                name = COALESCE($2, name),
                status = COALESCE($3, status),
                budget_cents = COALESCE($4, budget_cents),
                audience = COALESCE($5, audience)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdSet>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.status)
            .bind(input.budget_cents)
            .bind(&input.audience)
            .fetch_optional(pool)
            .await
    }

    /// Record the id the delivery platform assigned to this ad set.
    pub async fn set_remote_id(
        pool: &PgPool,
        id: DbId,
        remote_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE ad_sets SET remote_id = $2 WHERE id = $1")
            .bind(id)
            .bind(remote_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete an ad set by ID. Returns `true` if a row was
    /// removed. Variants go with it (`ON DELETE CASCADE`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ad_sets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
