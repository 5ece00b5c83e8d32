//! Handlers for `/preferences`: a small key/value store the dashboard
//! uses for per-install UI state (column layouts, theme, filters).

use adops_core::error::CoreError;
use adops_db::models::preference::{SetPreference, UiPreference};
use adops_db::repositories::PreferenceRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/preferences
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UiPreference>>>> {
    let prefs = PreferenceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: prefs }))
}

/// GET /api/v1/preferences/{key}
pub async fn get(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<DataResponse<UiPreference>>> {
    let pref = PreferenceRepo::get(&state.pool, &key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No preference stored under key '{key}'")))?;
    Ok(Json(DataResponse { data: pref }))
}

/// PUT /api/v1/preferences/{key}
///
/// Upserts: the first PUT for a key creates it, later PUTs replace the
/// value wholesale.
pub async fn set(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(input): Json<SetPreference>,
) -> AppResult<Json<DataResponse<UiPreference>>> {
    if key.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Preference key must not be empty".to_string(),
        )));
    }

    let pref = PreferenceRepo::set(&state.pool, &key, &input.value).await?;
    Ok(Json(DataResponse { data: pref }))
}

/// DELETE /api/v1/preferences/{key}
pub async fn delete(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<StatusCode> {
    let deleted = PreferenceRepo::delete(&state.pool, &key).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "No preference stored under key '{key}'"
        )))
    }
}
