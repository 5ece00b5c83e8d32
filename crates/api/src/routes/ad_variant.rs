//! Route definitions for the `/variants` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::ad_variant;
use crate::state::AppState;

/// Routes mounted at `/variants`.
///
/// ```text
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(ad_variant::get_by_id)
            .put(ad_variant::update)
            .delete(ad_variant::delete),
    )
}
