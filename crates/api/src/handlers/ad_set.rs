//! Handlers for ad sets, nested under `/campaigns/{campaign_id}/ad-sets`
//! for creation and listing, with item routes at `/ad-sets/{id}`.

use adops_core::error::CoreError;
use adops_core::events;
use adops_core::provider::DELIVERY_PLATFORMS;
use adops_core::status::{self, is_one_of};
use adops_core::types::DbId;
use adops_db::models::ad_set::{AdSet, CreateAdSet, UpdateAdSet};
use adops_db::repositories::{AdSetRepo, CampaignRepo};
use adops_events::PlatformEvent;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_platform(platform: &str) -> AppResult<()> {
    if DELIVERY_PLATFORMS.iter().any(|p| p.as_str() == platform) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "Unknown delivery platform: {platform}"
        ))))
    }
}

/// POST /api/v1/campaigns/{campaign_id}/ad-sets
pub async fn create(
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
    Json(input): Json<CreateAdSet>,
) -> AppResult<(StatusCode, Json<DataResponse<AdSet>>)> {
    validate_platform(&input.platform)?;

    CampaignRepo::find_by_id(&state.pool, campaign_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        }))?;

    let ad_set = AdSetRepo::create(&state.pool, campaign_id, &input).await?;

    state.event_bus.publish(
        PlatformEvent::new(events::AD_SET_CREATED)
            .with_source("ad_set", ad_set.id)
            .with_payload(json!({ "name": ad_set.name, "platform": ad_set.platform })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: ad_set })))
}

/// GET /api/v1/campaigns/{campaign_id}/ad-sets
pub async fn list_by_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<AdSet>>>> {
    CampaignRepo::find_by_id(&state.pool, campaign_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        }))?;

    let ad_sets = AdSetRepo::list_by_campaign(&state.pool, campaign_id).await?;
    Ok(Json(DataResponse { data: ad_sets }))
}

/// GET /api/v1/ad-sets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AdSet>>> {
    let ad_set = AdSetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdSet",
            id,
        }))?;
    Ok(Json(DataResponse { data: ad_set }))
}

/// PUT /api/v1/ad-sets/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAdSet>,
) -> AppResult<Json<DataResponse<AdSet>>> {
    if let Some(status) = &input.status {
        if !is_one_of(status, status::ad::ALL) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown ad set status: {status}"
            ))));
        }
    }

    let ad_set = AdSetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdSet",
            id,
        }))?;

    state.event_bus.publish(
        PlatformEvent::new(events::AD_SET_UPDATED)
            .with_source("ad_set", ad_set.id)
            .with_payload(json!({ "name": ad_set.name })),
    );

    Ok(Json(DataResponse { data: ad_set }))
}

/// DELETE /api/v1/ad-sets/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let ad_set = AdSetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdSet",
            id,
        }))?;

    AdSetRepo::delete(&state.pool, id).await?;

    state.event_bus.publish(
        PlatformEvent::new(events::AD_SET_DELETED)
            .with_source("ad_set", id)
            .with_payload(json!({ "name": ad_set.name })),
    );

    Ok(StatusCode::NO_CONTENT)
}
