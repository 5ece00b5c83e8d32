//! Repository for the `asset_folders` table.

use adops_core::types::DbId;
use sqlx::PgPool;

use crate::models::asset_folder::{AssetFolder, CreateAssetFolder, UpdateAssetFolder};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, drive_folder_id, auto_sync, sync_interval_secs, \
     last_synced_at, created_at, updated_at";

/// Provides CRUD operations for watched Drive folders.
pub struct AssetFolderRepo;

impl AssetFolderRepo {
    /// Register a Drive folder, returning the created row.
    ///
    /// `auto_sync` defaults to true, `sync_interval_secs` to 300.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAssetFolder,
    ) -> Result<AssetFolder, sqlx::Error> {
        let query = format!(
            "INSERT INTO asset_folders (name, drive_folder_id, auto_sync, sync_interval_secs)
             VALUES ($1, $2, COALESCE($3, TRUE), COALESCE($4, 300))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssetFolder>(&query)
            .bind(&input.name)
            .bind(&input.drive_folder_id)
            .bind(input.auto_sync)
            .bind(input.sync_interval_secs)
            .fetch_one(pool)
            .await
    }

    /// Find a watched folder by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AssetFolder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM asset_folders WHERE id = $1");
        sqlx::query_as::<_, AssetFolder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all watched folders ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<AssetFolder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM asset_folders ORDER BY name");
        sqlx::query_as::<_, AssetFolder>(&query).fetch_all(pool).await
    }

    /// Update a watched folder. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAssetFolder,
    ) -> Result<Option<AssetFolder>, sqlx::Error> {
        let query = format!(
            "UPDATE asset_folders SET
                name = COALESCE($2, name),
                auto_sync = COALESCE($3, auto_sync),
                sync_interval_secs = COALESCE($4, sync_interval_secs)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssetFolder>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.auto_sync)
            .bind(input.sync_interval_secs)
            .fetch_optional(pool)
            .await
    }

    /// Folders due for an automatic sync: auto-sync enabled and either never
    /// synced or past their per-folder interval. Never-synced folders first.
    pub async fn list_due_for_auto_sync(pool: &PgPool) -> Result<Vec<AssetFolder>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM asset_folders \
             WHERE auto_sync = TRUE \
               AND (last_synced_at IS NULL \
                    OR last_synced_at + make_interval(secs => sync_interval_secs) <= NOW()) \
             ORDER BY last_synced_at ASC NULLS FIRST"
        );
        sqlx::query_as::<_, AssetFolder>(&query).fetch_all(pool).await
    }

    /// Stamp a folder as synced now.
    pub async fn touch_synced(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE asset_folders SET last_synced_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a watched folder by ID. Returns `true` if a row was
    /// removed. Mirrored assets go with it (`ON DELETE CASCADE`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM asset_folders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
