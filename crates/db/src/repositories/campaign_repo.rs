//! Repository for the `campaigns` table.

use adops_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use adops_core::types::DbId;
use sqlx::PgPool;

use crate::models::campaign::{Campaign, CreateCampaign, UpdateCampaign};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, objective, status, budget_cents, currency, \
     start_date, end_date, remote_ids, created_at, updated_at";

/// Provides CRUD operations for campaigns.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a new campaign, returning the created row.
    ///
    /// New campaigns always start in `draft` status; currency defaults to USD.
    pub async fn create(pool: &PgPool, input: &CreateCampaign) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaigns \
                (name, description, objective, budget_cents, currency, start_date, end_date)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'USD'), $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.objective)
            .bind(input.budget_cents)
            .bind(&input.currency)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// Find a campaign by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List campaigns newest-first, optionally filtered by status.
    /// Pagination values are clamped here.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaigns \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(status)
            .bind(clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// Update a campaign. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCampaign,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                objective = COALESCE($4, objective),
                status = COALESCE($5, status),
                budget_cents = COALESCE($6, budget_cents),
                currency = COALESCE($7, currency),
                start_date = COALESCE($8, start_date),
                end_date = COALESCE($9, end_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.objective)
            .bind(&input.status)
            .bind(input.budget_cents)
            .bind(&input.currency)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    /// Transition a campaign's status. Returns the updated row, or `None`
    /// if no row with the given `id` exists.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("UPDATE campaigns SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Record the id a delivery platform assigned to this campaign.
    ///
    /// Merges `{"<provider>": "<remote id>"}` into the `remote_ids` map,
    /// overwriting any previous id for the same provider.
    pub async fn merge_remote_id(
        pool: &PgPool,
        id: DbId,
        provider: &str,
        remote_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let patch = serde_json::json!({ provider: remote_id });
        let result =
            sqlx::query("UPDATE campaigns SET remote_ids = remote_ids || $2::jsonb WHERE id = $1")
                .bind(id)
                .bind(patch)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a campaign by ID. Returns `true` if a row was
    /// removed. Ad sets and variants go with it (`ON DELETE CASCADE`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
