//! Handlers for the creative asset library: watched Drive folders, the
//! mirrored assets inside them, and sync runs.

use adops_core::error::CoreError;
use adops_core::status::sync_trigger;
use adops_core::types::DbId;
use adops_db::models::asset::Asset;
use adops_db::models::asset_folder::{AssetFolder, CreateAssetFolder, UpdateAssetFolder};
use adops_db::models::sync_run::SyncRun;
use adops_db::repositories::{AssetFolderRepo, AssetRepo, SyncRunRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::query::{IncludeRemovedParams, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::sync;

async fn folder_or_404(state: &AppState, id: DbId) -> AppResult<AssetFolder> {
    AssetFolderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AssetFolder",
            id,
        }))
}

/// POST /api/v1/assets/folders
pub async fn create_folder(
    State(state): State<AppState>,
    Json(input): Json<CreateAssetFolder>,
) -> AppResult<(StatusCode, Json<DataResponse<AssetFolder>>)> {
    if input.drive_folder_id.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "drive_folder_id must not be empty".to_string(),
        )));
    }
    if let Some(interval) = input.sync_interval_secs {
        if interval < 60 {
            return Err(AppError::Core(CoreError::Validation(
                "sync_interval_secs must be at least 60".to_string(),
            )));
        }
    }

    let folder = AssetFolderRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: folder })))
}

/// GET /api/v1/assets/folders
pub async fn list_folders(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AssetFolder>>>> {
    let folders = AssetFolderRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: folders }))
}

/// GET /api/v1/assets/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AssetFolder>>> {
    let folder = folder_or_404(&state, id).await?;
    Ok(Json(DataResponse { data: folder }))
}

/// PUT /api/v1/assets/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAssetFolder>,
) -> AppResult<Json<DataResponse<AssetFolder>>> {
    if let Some(interval) = input.sync_interval_secs {
        if interval < 60 {
            return Err(AppError::Core(CoreError::Validation(
                "sync_interval_secs must be at least 60".to_string(),
            )));
        }
    }

    let folder = AssetFolderRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AssetFolder",
            id,
        }))?;
    Ok(Json(DataResponse { data: folder }))
}

/// DELETE /api/v1/assets/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = AssetFolderRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "AssetFolder",
            id,
        }))
    }
}

/// GET /api/v1/assets/folders/{id}/assets
pub async fn list_folder_assets(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<IncludeRemovedParams>,
) -> AppResult<Json<DataResponse<Vec<Asset>>>> {
    folder_or_404(&state, id).await?;

    let assets = AssetRepo::list_by_folder(&state.pool, id, params.include_removed).await?;
    Ok(Json(DataResponse { data: assets }))
}

/// POST /api/v1/assets/folders/{id}/sync
///
/// Runs a sync inline and returns the finished run. Drive being
/// unreachable or disconnected surfaces as an error response; the failed
/// run is still recorded in the folder's history.
pub async fn sync_folder(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SyncRun>>> {
    let folder = folder_or_404(&state, id).await?;

    let run = sync::sync_folder(&state, &folder, sync_trigger::MANUAL).await?;
    Ok(Json(DataResponse { data: run }))
}

/// GET /api/v1/assets/folders/{id}/runs
pub async fn list_folder_runs(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<SyncRun>>>> {
    folder_or_404(&state, id).await?;

    let runs = SyncRunRepo::list_by_folder(&state.pool, id, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: runs }))
}

/// GET /api/v1/assets/{id}
pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Asset>>> {
    let asset = AssetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Asset",
            id,
        }))?;
    Ok(Json(DataResponse { data: asset }))
}
