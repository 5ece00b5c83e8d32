//! Repository for the `ad_variants` table.

use adops_core::types::DbId;
use sqlx::PgPool;

use crate::models::ad_variant::{AdVariant, CreateAdVariant, UpdateAdVariant};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, ad_set_id, name, headline, primary_text, call_to_action, \
     landing_url, asset_id, status, remote_id, created_at, updated_at";

/// Provides CRUD operations for ad variants.
pub struct AdVariantRepo;

impl AdVariantRepo {
    /// Insert a new variant under the given ad set, returning the created row.
    pub async fn create(
        pool: &PgPool,
        ad_set_id: DbId,
        input: &CreateAdVariant,
    ) -> Result<AdVariant, sqlx::Error> {
        let query = format!(
            "INSERT INTO ad_variants \
                (ad_set_id, name, headline, primary_text, call_to_action, landing_url, asset_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdVariant>(&query)
            .bind(ad_set_id)
            .bind(&input.name)
            .bind(&input.headline)
            .bind(&input.primary_text)
            .bind(&input.call_to_action)
            .bind(&input.landing_url)
            .bind(input.asset_id)
            .fetch_one(pool)
            .await
    }

    /// Find a variant by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AdVariant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ad_variants WHERE id = $1");
        sqlx::query_as::<_, AdVariant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the variants of one ad set, oldest-first for stable display.
    pub async fn list_by_ad_set(
        pool: &PgPool,
        ad_set_id: DbId,
    ) -> Result<Vec<AdVariant>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM ad_variants WHERE ad_set_id = $1 ORDER BY created_at");
        sqlx::query_as::<_, AdVariant>(&query)
            .bind(ad_set_id)
            .fetch_all(pool)
            .await
    }

    /// Update a variant. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdVariant,
    ) -> Result<Option<AdVariant>, sqlx::Error> {
        let query = format!(
            "UPDATE ad_variants SET
                name = COALESCE($2, name),
                headline = COALESCE($3, headline),
                primary_text = COALESCE($4, primary_text),
                call_to_action = COALESCE($5, call_to_action),
                landing_url = COALESCE($6, landing_url),
                asset_id = COALESCE($7, asset_id),
                status = COALESCE($8, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdVariant>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.headline)
            .bind(&input.primary_text)
            .bind(&input.call_to_action)
            .bind(&input.landing_url)
            .bind(input.asset_id)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Record the id the delivery platform assigned to this ad.
    pub async fn set_remote_id(
        pool: &PgPool,
        id: DbId,
        remote_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE ad_variants SET remote_id = $2 WHERE id = $1")
            .bind(id)
            .bind(remote_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a variant by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ad_variants WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
