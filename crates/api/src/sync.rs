//! Drive folder sync: mirrors a folder's file listing into the asset
//! library. Shared by the manual sync endpoint and the background
//! scheduler; each execution is recorded as a `sync_runs` row.

use adops_connectors::DriveFile;
use adops_core::error::CoreError;
use adops_core::events;
use adops_core::provider::Provider;
use adops_db::models::asset::AssetUpsert;
use adops_db::models::asset_folder::AssetFolder;
use adops_db::models::sync_run::{SyncCounts, SyncRun};
use adops_db::repositories::asset_repo::UpsertOutcome;
use adops_db::repositories::{AssetFolderRepo, AssetRepo, SyncRunRepo};
use adops_events::PlatformEvent;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::tokens;

/// Run one sync pass for `folder`, recording the outcome.
///
/// On success the folder's `last_synced_at` is touched and
/// `sync.completed` is published with the file counters. On failure the
/// run row keeps the error text, `sync.failed` is published, and the
/// error propagates to the caller.
pub async fn sync_folder(
    state: &AppState,
    folder: &AssetFolder,
    trigger: &str,
) -> AppResult<SyncRun> {
    let run = SyncRunRepo::start(&state.pool, folder.id, trigger).await?;
    tracing::info!(folder_id = folder.id, trigger, "Folder sync started");

    match mirror_folder(state, folder).await {
        Ok(counts) => {
            let finished = SyncRunRepo::finish_success(&state.pool, run.id, counts)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "SyncRun",
                    id: run.id,
                }))?;
            AssetFolderRepo::touch_synced(&state.pool, folder.id).await?;

            state.event_bus.publish(
                PlatformEvent::new(events::SYNC_COMPLETED)
                    .with_source("asset_folder", folder.id)
                    .with_payload(json!({
                        "folder": folder.name,
                        "trigger": trigger,
                        "seen": counts.seen,
                        "imported": counts.imported,
                        "updated": counts.updated,
                        "removed": counts.removed,
                    })),
            );
            tracing::info!(
                folder_id = folder.id,
                seen = counts.seen,
                imported = counts.imported,
                updated = counts.updated,
                removed = counts.removed,
                "Folder sync completed"
            );
            Ok(finished)
        }
        Err(err) => {
            let message = err.to_string();
            SyncRunRepo::finish_failure(&state.pool, run.id, SyncCounts::default(), &message)
                .await?;

            state.event_bus.publish(
                PlatformEvent::new(events::SYNC_FAILED)
                    .with_source("asset_folder", folder.id)
                    .with_payload(json!({
                        "folder": folder.name,
                        "trigger": trigger,
                        "error": message,
                    })),
            );
            tracing::warn!(folder_id = folder.id, error = %message, "Folder sync failed");
            Err(err)
        }
    }
}

/// Pull the folder's full Drive listing and reconcile it against the
/// mirrored rows: upsert everything present, flag everything missing.
async fn mirror_folder(state: &AppState, folder: &AssetFolder) -> AppResult<SyncCounts> {
    let (_, access_token) = tokens::valid_access_token(state, Provider::GoogleDrive).await?;

    let files = state
        .connectors
        .google_drive
        .list_folder_files(&access_token, &folder.drive_folder_id)
        .await?;

    let mut counts = SyncCounts {
        seen: files.len() as i32,
        ..SyncCounts::default()
    };

    let mut seen_ids = Vec::with_capacity(files.len());
    for file in &files {
        let upsert = asset_from_drive_file(file);
        let (_, outcome) = AssetRepo::upsert(&state.pool, folder.id, &upsert).await?;
        match outcome {
            UpsertOutcome::Inserted => counts.imported += 1,
            UpsertOutcome::Updated => counts.updated += 1,
        }
        seen_ids.push(file.id.clone());
    }

    counts.removed = AssetRepo::mark_missing_removed(&state.pool, folder.id, &seen_ids).await? as i32;

    Ok(counts)
}

/// Map a Drive listing entry onto the repository's upsert shape.
fn asset_from_drive_file(file: &DriveFile) -> AssetUpsert {
    let (width, height) = file
        .image_media_metadata
        .as_ref()
        .map(|m| (m.width, m.height))
        .unwrap_or((None, None));

    AssetUpsert {
        drive_file_id: file.id.clone(),
        file_name: file.name.clone(),
        mime_type: file.mime_type.clone(),
        size_bytes: file.size_bytes(),
        width,
        height,
        thumbnail_url: file.thumbnail_link.clone(),
        web_view_url: file.web_view_link.clone(),
        drive_modified_at: file.modified_time,
    }
}
