//! Handlers for the `/campaigns` resource.

use adops_core::error::CoreError;
use adops_core::events;
use adops_core::status::{self, is_one_of};
use adops_core::types::DbId;
use adops_db::models::campaign::{Campaign, CreateCampaign, UpdateCampaign};
use adops_db::repositories::CampaignRepo;
use adops_events::PlatformEvent;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::publish::{self, PublishReport};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters accepted by the campaign list endpoint.
#[derive(Debug, Deserialize)]
pub struct CampaignListParams {
    /// Optional status filter (`draft`, `active`, `paused`, `archived`).
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/campaigns
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCampaign>,
) -> AppResult<(StatusCode, Json<DataResponse<Campaign>>)> {
    if !is_one_of(&input.objective, status::objective::ALL) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown objective: {}",
            input.objective
        ))));
    }

    let campaign = CampaignRepo::create(&state.pool, &input).await?;

    state.event_bus.publish(
        PlatformEvent::new(events::CAMPAIGN_CREATED)
            .with_source("campaign", campaign.id)
            .with_payload(json!({ "name": campaign.name, "objective": campaign.objective })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: campaign })))
}

/// GET /api/v1/campaigns
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CampaignListParams>,
) -> AppResult<Json<DataResponse<Vec<Campaign>>>> {
    if let Some(status) = &params.status {
        if !is_one_of(status, status::campaign::ALL) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown campaign status: {status}"
            ))));
        }
    }

    let campaigns = CampaignRepo::list(
        &state.pool,
        params.status.as_deref(),
        params.limit,
        params.offset,
    )
    .await?;
    Ok(Json(DataResponse { data: campaigns }))
}

/// GET /api/v1/campaigns/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Campaign>>> {
    let campaign = CampaignRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id,
        }))?;
    Ok(Json(DataResponse { data: campaign }))
}

/// PUT /api/v1/campaigns/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCampaign>,
) -> AppResult<Json<DataResponse<Campaign>>> {
    if let Some(objective) = &input.objective {
        if !is_one_of(objective, status::objective::ALL) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown objective: {objective}"
            ))));
        }
    }
    if let Some(status) = &input.status {
        if !is_one_of(status, status::campaign::ALL) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown campaign status: {status}"
            ))));
        }
    }

    let campaign = CampaignRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id,
        }))?;

    state.event_bus.publish(
        PlatformEvent::new(events::CAMPAIGN_UPDATED)
            .with_source("campaign", campaign.id)
            .with_payload(json!({ "name": campaign.name })),
    );

    Ok(Json(DataResponse { data: campaign }))
}

/// DELETE /api/v1/campaigns/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let campaign = CampaignRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id,
        }))?;

    CampaignRepo::delete(&state.pool, id).await?;

    state.event_bus.publish(
        PlatformEvent::new(events::CAMPAIGN_DELETED)
            .with_source("campaign", id)
            .with_payload(json!({ "name": campaign.name })),
    );

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/campaigns/{id}/publish
pub async fn publish(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PublishReport>>> {
    let report = publish::publish_campaign(&state, id).await?;
    Ok(Json(DataResponse { data: report }))
}
