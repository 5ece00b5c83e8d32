//! Route definitions for the `/dashboard` widgets.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET    /summary                       -> summary
/// GET    /budget-by-platform            -> budget_by_platform
/// GET    /activity                      -> activity
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(dashboard::summary))
        .route("/budget-by-platform", get(dashboard::budget_by_platform))
        .route("/activity", get(dashboard::activity))
}
