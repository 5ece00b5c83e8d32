//! Handlers for `/notifications/webhooks`: Slack incoming-webhook
//! registrations and the test-delivery endpoint.

use std::sync::OnceLock;

use adops_core::error::CoreError;
use adops_core::events;
use adops_core::types::DbId;
use adops_db::models::slack_webhook::{CreateSlackWebhook, SlackWebhook, UpdateSlackWebhook};
use adops_db::repositories::SlackWebhookRepo;
use adops_events::PlatformEvent;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use regex::Regex;
use serde::Serialize;
use serde_json::json;
use ts_rs::TS;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// A webhook as returned to clients: the full row (minus the URL, which
/// never serializes) plus a masked preview of the URL.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct SlackWebhookView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub webhook: SlackWebhook,
    pub url_preview: String,
}

impl From<SlackWebhook> for SlackWebhookView {
    fn from(webhook: SlackWebhook) -> Self {
        let url_preview = webhook.url_preview();
        Self {
            webhook,
            url_preview,
        }
    }
}

fn webhook_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https://hooks\.slack\.com/\S+$").expect("valid regex"))
}

fn validate_webhook_url(url: &str) -> AppResult<()> {
    if webhook_url_re().is_match(url) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(
            "url must be a Slack incoming webhook (https://hooks.slack.com/...)".to_string(),
        )))
    }
}

/// POST /api/v1/notifications/webhooks
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSlackWebhook>,
) -> AppResult<(StatusCode, Json<DataResponse<SlackWebhookView>>)> {
    validate_webhook_url(&input.url)?;

    let webhook = SlackWebhookRepo::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: webhook.into(),
        }),
    ))
}

/// GET /api/v1/notifications/webhooks
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SlackWebhookView>>>> {
    let webhooks = SlackWebhookRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: webhooks.into_iter().map(SlackWebhookView::from).collect(),
    }))
}

/// PUT /api/v1/notifications/webhooks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSlackWebhook>,
) -> AppResult<Json<DataResponse<SlackWebhookView>>> {
    if let Some(url) = &input.url {
        validate_webhook_url(url)?;
    }

    let webhook = SlackWebhookRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SlackWebhook",
            id,
        }))?;
    Ok(Json(DataResponse {
        data: webhook.into(),
    }))
}

/// DELETE /api/v1/notifications/webhooks/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = SlackWebhookRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "SlackWebhook",
            id,
        }))
    }
}

/// POST /api/v1/notifications/webhooks/{id}/test
///
/// Sends a test message through the webhook right away, bypassing the
/// event router. Delivery bookkeeping is identical to routed sends, so a
/// test exercises the same failure counters the dashboard shows.
pub async fn test(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SlackWebhookView>>> {
    let webhook = SlackWebhookRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SlackWebhook",
            id,
        }))?;

    let text = format!(":wave: Test notification from adops ({})", webhook.label);
    match state.connectors.slack.post_text(&webhook.url, &text).await {
        Ok(()) => {
            SlackWebhookRepo::record_success(&state.pool, id).await?;
        }
        Err(err) => {
            SlackWebhookRepo::record_failure(&state.pool, id).await?;
            return Err(err.into());
        }
    }

    // The router skips slack.* events, so this lands in the activity log
    // without echoing through the webhooks themselves.
    state.event_bus.publish(
        PlatformEvent::new(events::SLACK_TEST)
            .with_source("slack_webhook", id)
            .with_payload(json!({ "label": webhook.label })),
    );

    let refreshed = SlackWebhookRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SlackWebhook",
            id,
        }))?;
    Ok(Json(DataResponse {
        data: refreshed.into(),
    }))
}
