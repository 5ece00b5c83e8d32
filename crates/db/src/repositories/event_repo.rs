//! Repository for the `events` table (append-only activity log).

use adops_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use adops_core::types::DbId;
use sqlx::PgPool;

use crate::models::event::Event;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, event_type, source_entity_type, source_entity_id, payload, created_at";

/// Provides append/read operations for the activity log.
pub struct EventRepo;

impl EventRepo {
    /// Append one event row, returning the generated ID.
    pub async fn insert(
        pool: &PgPool,
        event_type: &str,
        source_entity_type: Option<&str>,
        source_entity_id: Option<DbId>,
        payload: &serde_json::Value,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO events (event_type, source_entity_type, source_entity_id, payload) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(event_type)
        .bind(source_entity_type)
        .bind(source_entity_id)
        .bind(payload)
        .fetch_one(pool)
        .await
    }

    /// List recent events newest-first, optionally filtered by an
    /// event-type prefix (`"campaign."` matches every campaign event).
    pub async fn list_recent(
        pool: &PgPool,
        type_prefix: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(offset);

        let query = format!(
            "SELECT {COLUMNS} FROM events \
             WHERE ($1::TEXT IS NULL OR event_type LIKE $1 || '%') \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(type_prefix)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
