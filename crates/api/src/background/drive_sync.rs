//! Scheduled Google Drive folder syncs.
//!
//! Polls for asset folders whose auto-sync interval has elapsed and
//! mirrors them, a bounded number at a time. Every pass is recorded
//! through the same [`sync`](crate::sync) path the manual endpoint uses,
//! so run history and events look identical for both triggers.

use std::time::Duration;

use adops_core::provider::Provider;
use adops_core::status::{integration as integration_status, sync_trigger};
use adops_db::repositories::{AssetFolderRepo, IntegrationRepo};
use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;
use crate::sync;

/// How often the scheduler looks for due folders.
const SYNC_TICK: Duration = Duration::from_secs(60);

/// Upper bound on folders syncing at once. A Drive listing pages through
/// the folder and can hold its slot for a while.
const MAX_CONCURRENT_SYNCS: usize = 2;

/// Run the auto-sync scheduling loop.
///
/// Runs until `cancel` is triggered.
pub async fn run(state: AppState, cancel: CancellationToken) {
    tracing::info!(
        tick_secs = SYNC_TICK.as_secs(),
        max_concurrent = MAX_CONCURRENT_SYNCS,
        "Drive auto-sync scheduler started"
    );

    let mut interval = tokio::time::interval(SYNC_TICK);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Drive auto-sync scheduler stopping");
                break;
            }
            _ = interval.tick() => {
                run_due_syncs(&state).await;
            }
        }
    }
}

/// One scheduler pass: sync every folder whose interval has elapsed.
async fn run_due_syncs(state: &AppState) {
    // Without a live Drive connection every sync in the pass would fail
    // the same way; skip and let the dashboard show the disconnect.
    match IntegrationRepo::find_by_provider(&state.pool, Provider::GoogleDrive.as_str()).await {
        Ok(Some(integration)) if integration.status == integration_status::CONNECTED => {}
        Ok(_) => {
            tracing::debug!("Auto-sync pass skipped: Google Drive is not connected");
            return;
        }
        Err(e) => {
            tracing::error!(error = %e, "Auto-sync pass could not check the Drive integration");
            return;
        }
    }

    let due = match AssetFolderRepo::list_due_for_auto_sync(&state.pool).await {
        Ok(folders) => folders,
        Err(e) => {
            tracing::error!(error = %e, "Auto-sync pass could not list due folders");
            return;
        }
    };

    if due.is_empty() {
        return;
    }

    tracing::info!(folders = due.len(), "Auto-sync pass starting");

    futures::stream::iter(due)
        .for_each_concurrent(MAX_CONCURRENT_SYNCS, |folder| async move {
            // sync_folder records the failed run and publishes sync.failed.
            if let Err(e) = sync::sync_folder(state, &folder, sync_trigger::AUTO).await {
                tracing::warn!(
                    folder_id = folder.id,
                    folder = %folder.name,
                    error = %e,
                    "Scheduled Drive sync failed"
                );
            }
        })
        .await;
}
