//! Repository for the `sync_runs` table.
//!
//! Every folder sync, manual or automatic, leaves exactly one row here:
//! opened in `running` status when the sync starts, closed to `succeeded`
//! or `failed` when it finishes.

use adops_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use adops_core::types::DbId;
use sqlx::PgPool;

use crate::models::sync_run::{SyncCounts, SyncRun};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, folder_id, triggered_by, status, files_seen, files_imported, \
     files_updated, files_removed, error, started_at, finished_at";

/// Provides lifecycle operations for folder sync history.
pub struct SyncRunRepo;

impl SyncRunRepo {
    /// Open a run in `running` status, returning the created row.
    pub async fn start(
        pool: &PgPool,
        folder_id: DbId,
        triggered_by: &str,
    ) -> Result<SyncRun, sqlx::Error> {
        let query = format!(
            "INSERT INTO sync_runs (folder_id, triggered_by)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SyncRun>(&query)
            .bind(folder_id)
            .bind(triggered_by)
            .fetch_one(pool)
            .await
    }

    /// Close a run as `succeeded` with its final counters.
    pub async fn finish_success(
        pool: &PgPool,
        id: DbId,
        counts: SyncCounts,
    ) -> Result<Option<SyncRun>, sqlx::Error> {
        let query = format!(
            "UPDATE sync_runs SET
                status = 'succeeded',
                files_seen = $2,
                files_imported = $3,
                files_updated = $4,
                files_removed = $5,
                finished_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SyncRun>(&query)
            .bind(id)
            .bind(counts.seen)
            .bind(counts.imported)
            .bind(counts.updated)
            .bind(counts.removed)
            .fetch_optional(pool)
            .await
    }

    /// Close a run as `failed`, keeping whatever counters were reached.
    pub async fn finish_failure(
        pool: &PgPool,
        id: DbId,
        counts: SyncCounts,
        error: &str,
    ) -> Result<Option<SyncRun>, sqlx::Error> {
        let query = format!(
            "UPDATE sync_runs SET
                status = 'failed',
                files_seen = $2,
                files_imported = $3,
                files_updated = $4,
                files_removed = $5,
                error = $6,
                finished_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SyncRun>(&query)
            .bind(id)
            .bind(counts.seen)
            .bind(counts.imported)
            .bind(counts.updated)
            .bind(counts.removed)
            .bind(error)
            .fetch_optional(pool)
            .await
    }

    /// List a folder's runs newest-first.
    pub async fn list_by_folder(
        pool: &PgPool,
        folder_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<SyncRun>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(offset);

        let query = format!(
            "SELECT {COLUMNS} FROM sync_runs \
             WHERE folder_id = $1 \
             ORDER BY started_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, SyncRun>(&query)
            .bind(folder_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// The most recently finished successful run across all folders, if any.
    pub async fn last_succeeded_at(
        pool: &PgPool,
    ) -> Result<Option<adops_core::types::Timestamp>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT MAX(finished_at) FROM sync_runs WHERE status = 'succeeded'",
        )
        .fetch_one(pool)
        .await
    }
}
