//! Handlers for `/dashboard`: read-only aggregate widgets.

use adops_db::models::dashboard::{DashboardSummary, PlatformBudget};
use adops_db::models::event::Event;
use adops_db::repositories::{DashboardRepo, EventRepo};
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the activity feed.
#[derive(Debug, Deserialize)]
pub struct ActivityParams {
    /// Event-type prefix filter, e.g. `campaign.` or `sync.failed`.
    pub prefix: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/dashboard/summary
pub async fn summary(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let summary = DashboardRepo::summary(&state.pool).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/dashboard/budget-by-platform
pub async fn budget_by_platform(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PlatformBudget>>>> {
    let budgets = DashboardRepo::budget_by_platform(&state.pool).await?;
    Ok(Json(DataResponse { data: budgets }))
}

/// GET /api/v1/dashboard/activity
pub async fn activity(
    State(state): State<AppState>,
    Query(params): Query<ActivityParams>,
) -> AppResult<Json<DataResponse<Vec<Event>>>> {
    let events = EventRepo::list_recent(
        &state.pool,
        params.prefix.as_deref(),
        params.limit,
        params.offset,
    )
    .await?;
    Ok(Json(DataResponse { data: events }))
}
