//! Repository for the `integrations` table.
//!
//! One row per provider (`uq_integrations_provider`); completing an OAuth
//! flow for an already-connected provider overwrites the stored connection.

use adops_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::integration::{Integration, NewIntegration};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, provider, account_id, account_name, access_token_sealed, \
     refresh_token_sealed, token_expires_at, scopes, status, created_at, updated_at";

/// Provides CRUD operations for platform connections.
pub struct IntegrationRepo;

impl IntegrationRepo {
    /// Store a completed OAuth connection, replacing any existing row for
    /// the same provider. The replacement resets `status` to `connected`.
    pub async fn upsert(pool: &PgPool, input: &NewIntegration) -> Result<Integration, sqlx::Error> {
        let query = format!(
            "INSERT INTO integrations \
                (provider, account_id, account_name, access_token_sealed, \
                 refresh_token_sealed, token_expires_at, scopes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT ON CONSTRAINT uq_integrations_provider DO UPDATE SET
                account_id = EXCLUDED.account_id,
                account_name = EXCLUDED.account_name,
                access_token_sealed = EXCLUDED.access_token_sealed,
                refresh_token_sealed = EXCLUDED.refresh_token_sealed,
                token_expires_at = EXCLUDED.token_expires_at,
                scopes = EXCLUDED.scopes,
                status = 'connected'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Integration>(&query)
            .bind(&input.provider)
            .bind(&input.account_id)
            .bind(&input.account_name)
            .bind(&input.access_token_sealed)
            .bind(&input.refresh_token_sealed)
            .bind(input.token_expires_at)
            .bind(&input.scopes)
            .fetch_one(pool)
            .await
    }

    /// Find the connection for one provider.
    pub async fn find_by_provider(
        pool: &PgPool,
        provider: &str,
    ) -> Result<Option<Integration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM integrations WHERE provider = $1");
        sqlx::query_as::<_, Integration>(&query)
            .bind(provider)
            .fetch_optional(pool)
            .await
    }

    /// List all connections, provider order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Integration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM integrations ORDER BY provider");
        sqlx::query_as::<_, Integration>(&query).fetch_all(pool).await
    }

    /// Replace the sealed token material after a refresh. Also restores
    /// `status` to `connected` (a refresh proves the grant is alive).
    pub async fn update_tokens(
        pool: &PgPool,
        id: DbId,
        access_token_sealed: &[u8],
        refresh_token_sealed: Option<&[u8]>,
        token_expires_at: Option<Timestamp>,
    ) -> Result<Option<Integration>, sqlx::Error> {
        let query = format!(
            "UPDATE integrations SET
                access_token_sealed = $2,
                refresh_token_sealed = COALESCE($3, refresh_token_sealed),
                token_expires_at = $4,
                status = 'connected'
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Integration>(&query)
            .bind(id)
            .bind(access_token_sealed)
            .bind(refresh_token_sealed)
            .bind(token_expires_at)
            .fetch_optional(pool)
            .await
    }

    /// Transition a connection's status (`connected`, `expired`, `revoked`).
    pub async fn set_status(
        pool: &PgPool,
        provider: &str,
        status: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE integrations SET status = $2 WHERE provider = $1")
            .bind(provider)
            .bind(status)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a provider's connection. Returns `true` if a row was removed.
    pub async fn delete_by_provider(pool: &PgPool, provider: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM integrations WHERE provider = $1")
            .bind(provider)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count connections currently in `connected` status.
    pub async fn count_connected(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM integrations WHERE status = 'connected'")
            .fetch_one(pool)
            .await
    }

    /// Connections holding a refresh token whose access token expires
    /// within `within_secs`. Feeds the background refresh task.
    pub async fn list_expiring(
        pool: &PgPool,
        within_secs: i64,
    ) -> Result<Vec<Integration>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM integrations \
             WHERE status = 'connected' \
               AND refresh_token_sealed IS NOT NULL \
               AND token_expires_at IS NOT NULL \
               AND token_expires_at <= NOW() + make_interval(secs => $1) \
             ORDER BY token_expires_at"
        );
        sqlx::query_as::<_, Integration>(&query)
            .bind(within_secs as f64)
            .fetch_all(pool)
            .await
    }
}
