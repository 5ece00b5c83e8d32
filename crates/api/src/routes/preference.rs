//! Route definitions for the `/preferences` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::preference;
use crate::state::AppState;

/// Routes mounted at `/preferences`.
///
/// ```text
/// GET    /                              -> list
/// GET    /{key}                         -> get
/// PUT    /{key}                         -> set
/// DELETE /{key}                         -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(preference::list))
        .route(
            "/{key}",
            get(preference::get)
                .put(preference::set)
                .delete(preference::delete),
        )
}
