//! Route definitions for the `/notifications` resource (Slack webhooks).

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /webhooks                      -> list
/// POST   /webhooks                      -> create
/// PUT    /webhooks/{id}                 -> update
/// DELETE /webhooks/{id}                 -> delete
/// POST   /webhooks/{id}/test            -> test
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/webhooks",
            get(notification::list).post(notification::create),
        )
        .route(
            "/webhooks/{id}",
            put(notification::update).delete(notification::delete),
        )
        .route("/webhooks/{id}/test", post(notification::test))
}
