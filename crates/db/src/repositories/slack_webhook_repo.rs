//! Repository for the `slack_webhooks` table.

use adops_core::types::DbId;
use sqlx::PgPool;

use crate::models::slack_webhook::{CreateSlackWebhook, SlackWebhook, UpdateSlackWebhook};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, label, url, is_enabled, event_prefixes, last_notified_at, \
     failure_count, created_at, updated_at";

/// Provides CRUD and delivery-bookkeeping operations for Slack webhooks.
pub struct SlackWebhookRepo;

impl SlackWebhookRepo {
    /// Register a webhook, returning the created row.
    ///
    /// `is_enabled` defaults to true; an omitted prefix list means
    /// "subscribe to everything".
    pub async fn create(
        pool: &PgPool,
        input: &CreateSlackWebhook,
    ) -> Result<SlackWebhook, sqlx::Error> {
        let prefixes = serde_json::json!(input.event_prefixes.clone().unwrap_or_default());
        let query = format!(
            "INSERT INTO slack_webhooks (label, url, is_enabled, event_prefixes)
             VALUES ($1, $2, COALESCE($3, TRUE), $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SlackWebhook>(&query)
            .bind(&input.label)
            .bind(&input.url)
            .bind(input.is_enabled)
            .bind(prefixes)
            .fetch_one(pool)
            .await
    }

    /// Find a webhook by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SlackWebhook>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM slack_webhooks WHERE id = $1");
        sqlx::query_as::<_, SlackWebhook>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all webhooks ordered by label.
    pub async fn list(pool: &PgPool) -> Result<Vec<SlackWebhook>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM slack_webhooks ORDER BY label");
        sqlx::query_as::<_, SlackWebhook>(&query).fetch_all(pool).await
    }

    /// List only enabled webhooks. The Slack router evaluates these
    /// against each published event.
    pub async fn list_enabled(pool: &PgPool) -> Result<Vec<SlackWebhook>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM slack_webhooks WHERE is_enabled = TRUE ORDER BY label");
        sqlx::query_as::<_, SlackWebhook>(&query).fetch_all(pool).await
    }

    /// Update a webhook. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSlackWebhook,
    ) -> Result<Option<SlackWebhook>, sqlx::Error> {
        let prefixes = input.event_prefixes.as_ref().map(|p| serde_json::json!(p));
        let query = format!(
            "UPDATE slack_webhooks SET
                label = COALESCE($2, label),
                url = COALESCE($3, url),
                is_enabled = COALESCE($4, is_enabled),
                event_prefixes = COALESCE($5, event_prefixes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SlackWebhook>(&query)
            .bind(id)
            .bind(&input.label)
            .bind(&input.url)
            .bind(input.is_enabled)
            .bind(prefixes)
            .fetch_optional(pool)
            .await
    }

    /// Record a successful delivery: stamp `last_notified_at`, clear the
    /// failure streak.
    pub async fn record_success(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE slack_webhooks SET last_notified_at = NOW(), failure_count = 0 WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Record a failed delivery by bumping the failure streak.
    pub async fn record_failure(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE slack_webhooks SET failure_count = failure_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Permanently delete a webhook by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM slack_webhooks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
