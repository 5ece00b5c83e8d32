//! Route definitions for the `/campaigns` resource.
//!
//! Also nests ad set routes under `/campaigns/{campaign_id}/ad-sets`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{ad_set, campaign};
use crate::state::AppState;

/// Routes mounted at `/campaigns`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
/// POST   /{id}/publish                  -> publish
///
/// GET    /{campaign_id}/ad-sets         -> list_by_campaign
/// POST   /{campaign_id}/ad-sets         -> create
/// ```
pub fn router() -> Router<AppState> {
    let ad_set_routes = Router::new().route("/", get(ad_set::list_by_campaign).post(ad_set::create));

    Router::new()
        .route("/", get(campaign::list).post(campaign::create))
        .route(
            "/{id}",
            get(campaign::get_by_id)
                .put(campaign::update)
                .delete(campaign::delete),
        )
        .route("/{id}/publish", post(campaign::publish))
        .nest("/{campaign_id}/ad-sets", ad_set_routes)
}
