//! Repository for the `assets` table.
//!
//! Asset rows are written exclusively by the Drive sync routine; API
//! clients only read them. Upserts are keyed on `(folder_id,
//! drive_file_id)` so re-syncing a folder is idempotent.

use adops_core::types::DbId;
use sqlx::PgPool;

use crate::models::asset::{Asset, AssetUpsert};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, folder_id, drive_file_id, file_name, mime_type, size_bytes, \
     width, height, thumbnail_url, web_view_url, drive_modified_at, is_removed, \
     created_at, updated_at";

/// Whether an upsert created a new row or refreshed an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Provides read and sync-write operations for mirrored Drive files.
pub struct AssetRepo;

impl AssetRepo {
    /// Find an asset by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the assets of one folder, name order. Removed files are
    /// excluded unless `include_removed` is set.
    pub async fn list_by_folder(
        pool: &PgPool,
        folder_id: DbId,
        include_removed: bool,
    ) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assets \
             WHERE folder_id = $1 AND ($2 OR is_removed = FALSE) \
             ORDER BY file_name"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(folder_id)
            .bind(include_removed)
            .fetch_all(pool)
            .await
    }

    /// Insert or refresh one mirrored file, keyed on `(folder_id,
    /// drive_file_id)`. A row previously flagged removed comes back when
    /// the file reappears in Drive.
    ///
    /// Returns whether the row was inserted or updated so the sync run can
    /// keep its imported/updated counters.
    pub async fn upsert(
        pool: &PgPool,
        folder_id: DbId,
        file: &AssetUpsert,
    ) -> Result<(Asset, UpsertOutcome), sqlx::Error> {
        // `xmax = 0` is true only for freshly inserted rows, which lets one
        // round trip report insert-vs-update.
        let query = format!(
            "INSERT INTO assets \
                (folder_id, drive_file_id, file_name, mime_type, size_bytes, width, height, \
                 thumbnail_url, web_view_url, drive_modified_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT ON CONSTRAINT uq_assets_folder_drive_file DO UPDATE SET
                file_name = EXCLUDED.file_name,
                mime_type = EXCLUDED.mime_type,
                size_bytes = EXCLUDED.size_bytes,
                width = EXCLUDED.width,
                height = EXCLUDED.height,
                thumbnail_url = EXCLUDED.thumbnail_url,
                web_view_url = EXCLUDED.web_view_url,
                drive_modified_at = EXCLUDED.drive_modified_at,
                is_removed = FALSE
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        let row = sqlx::query_as::<_, AssetUpsertRow>(&query)
            .bind(folder_id)
            .bind(&file.drive_file_id)
            .bind(&file.file_name)
            .bind(&file.mime_type)
            .bind(file.size_bytes)
            .bind(file.width)
            .bind(file.height)
            .bind(&file.thumbnail_url)
            .bind(&file.web_view_url)
            .bind(file.drive_modified_at)
            .fetch_one(pool)
            .await?;

        let outcome = if row.inserted {
            UpsertOutcome::Inserted
        } else {
            UpsertOutcome::Updated
        };
        Ok((row.asset, outcome))
    }

    /// Flag every live asset of the folder whose `drive_file_id` is not in
    /// `seen_file_ids` as removed. Returns the number of rows flagged.
    pub async fn mark_missing_removed(
        pool: &PgPool,
        folder_id: DbId,
        seen_file_ids: &[String],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE assets SET is_removed = TRUE \
             WHERE folder_id = $1 AND is_removed = FALSE AND drive_file_id <> ALL($2)",
        )
        .bind(folder_id)
        .bind(seen_file_ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Count live (non-removed) assets across all folders.
    pub async fn count_live(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM assets WHERE is_removed = FALSE")
            .fetch_one(pool)
            .await
    }
}

/// Row shape for [`AssetRepo::upsert`]: the asset plus the insert flag.
#[derive(sqlx::FromRow)]
struct AssetUpsertRow {
    #[sqlx(flatten)]
    asset: Asset,
    inserted: bool,
}
