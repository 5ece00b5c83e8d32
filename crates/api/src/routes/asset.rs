//! Route definitions for the `/assets` resource: Drive-synced folders,
//! the assets mirrored from them, and sync run history.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::asset;
use crate::state::AppState;

/// Routes mounted at `/assets`.
///
/// ```text
/// GET    /folders                       -> list_folders
/// POST   /folders                       -> create_folder
/// GET    /folders/{id}                  -> get_folder
/// PUT    /folders/{id}                  -> update_folder
/// DELETE /folders/{id}                  -> delete_folder
/// GET    /folders/{id}/assets           -> list_folder_assets
/// POST   /folders/{id}/sync             -> sync_folder
/// GET    /folders/{id}/runs             -> list_folder_runs
/// GET    /{id}                          -> get_asset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/folders", get(asset::list_folders).post(asset::create_folder))
        .route(
            "/folders/{id}",
            get(asset::get_folder)
                .put(asset::update_folder)
                .delete(asset::delete_folder),
        )
        .route("/folders/{id}/assets", get(asset::list_folder_assets))
        .route("/folders/{id}/sync", post(asset::sync_folder))
        .route("/folders/{id}/runs", get(asset::list_folder_runs))
        .route("/{id}", get(asset::get_asset))
}
