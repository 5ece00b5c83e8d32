//! Repository for the `ui_preferences` table.

use sqlx::PgPool;

use crate::models::preference::UiPreference;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, pref_key, value, created_at, updated_at";

/// Provides key/value operations for persisted dashboard preferences.
pub struct PreferenceRepo;

impl PreferenceRepo {
    /// Set a preference, creating or replacing the row for `key`.
    pub async fn set(
        pool: &PgPool,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<UiPreference, sqlx::Error> {
        let query = format!(
            "INSERT INTO ui_preferences (pref_key, value)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_ui_preferences_pref_key DO UPDATE SET
                value = EXCLUDED.value
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UiPreference>(&query)
            .bind(key)
            .bind(value)
            .fetch_one(pool)
            .await
    }

    /// Look up one preference by key.
    pub async fn get(pool: &PgPool, key: &str) -> Result<Option<UiPreference>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ui_preferences WHERE pref_key = $1");
        sqlx::query_as::<_, UiPreference>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// List every stored preference, key order.
    pub async fn list(pool: &PgPool) -> Result<Vec<UiPreference>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ui_preferences ORDER BY pref_key");
        sqlx::query_as::<_, UiPreference>(&query).fetch_all(pool).await
    }

    /// Delete a preference by key. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, key: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ui_preferences WHERE pref_key = $1")
            .bind(key)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
