//! Handlers for ad variants, nested under `/ad-sets/{ad_set_id}/variants`
//! for creation and listing, with item routes at `/variants/{id}`.

use adops_core::error::CoreError;
use adops_core::events;
use adops_core::status::{self, is_one_of};
use adops_core::types::DbId;
use adops_db::models::ad_variant::{AdVariant, CreateAdVariant, UpdateAdVariant};
use adops_db::repositories::{AdSetRepo, AdVariantRepo, AssetRepo};
use adops_events::PlatformEvent;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// A referenced asset must exist; the foreign key would also catch this,
/// but as an opaque 500 instead of a useful message.
async fn validate_asset_ref(state: &AppState, asset_id: Option<DbId>) -> AppResult<()> {
    if let Some(asset_id) = asset_id {
        AssetRepo::find_by_id(&state.pool, asset_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Asset",
                id: asset_id,
            }))?;
    }
    Ok(())
}

/// POST /api/v1/ad-sets/{ad_set_id}/variants
pub async fn create(
    State(state): State<AppState>,
    Path(ad_set_id): Path<DbId>,
    Json(input): Json<CreateAdVariant>,
) -> AppResult<(StatusCode, Json<DataResponse<AdVariant>>)> {
    AdSetRepo::find_by_id(&state.pool, ad_set_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdSet",
            id: ad_set_id,
        }))?;
    validate_asset_ref(&state, input.asset_id).await?;

    let variant = AdVariantRepo::create(&state.pool, ad_set_id, &input).await?;

    state.event_bus.publish(
        PlatformEvent::new(events::AD_VARIANT_CREATED)
            .with_source("ad_variant", variant.id)
            .with_payload(json!({ "name": variant.name })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: variant })))
}

/// GET /api/v1/ad-sets/{ad_set_id}/variants
pub async fn list_by_ad_set(
    State(state): State<AppState>,
    Path(ad_set_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<AdVariant>>>> {
    AdSetRepo::find_by_id(&state.pool, ad_set_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdSet",
            id: ad_set_id,
        }))?;

    let variants = AdVariantRepo::list_by_ad_set(&state.pool, ad_set_id).await?;
    Ok(Json(DataResponse { data: variants }))
}

/// GET /api/v1/variants/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AdVariant>>> {
    let variant = AdVariantRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdVariant",
            id,
        }))?;
    Ok(Json(DataResponse { data: variant }))
}

/// PUT /api/v1/variants/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAdVariant>,
) -> AppResult<Json<DataResponse<AdVariant>>> {
    if let Some(status) = &input.status {
        if !is_one_of(status, status::ad::ALL) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown ad variant status: {status}"
            ))));
        }
    }
    validate_asset_ref(&state, input.asset_id).await?;

    let variant = AdVariantRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdVariant",
            id,
        }))?;

    state.event_bus.publish(
        PlatformEvent::new(events::AD_VARIANT_UPDATED)
            .with_source("ad_variant", variant.id)
            .with_payload(json!({ "name": variant.name })),
    );

    Ok(Json(DataResponse { data: variant }))
}

/// DELETE /api/v1/variants/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let variant = AdVariantRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdVariant",
            id,
        }))?;

    AdVariantRepo::delete(&state.pool, id).await?;

    state.event_bus.publish(
        PlatformEvent::new(events::AD_VARIANT_DELETED)
            .with_source("ad_variant", id)
            .with_payload(json!({ "name": variant.name })),
    );

    Ok(StatusCode::NO_CONTENT)
}
