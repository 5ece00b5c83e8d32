//! Route definitions for the `/ad-sets` resource.
//!
//! Creation and listing live under `/campaigns/{campaign_id}/ad-sets`;
//! this router carries the id-addressed routes and nests variant
//! creation under `/ad-sets/{ad_set_id}/variants`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{ad_set, ad_variant};
use crate::state::AppState;

/// Routes mounted at `/ad-sets`.
///
/// ```text
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
///
/// GET    /{ad_set_id}/variants          -> list_by_ad_set
/// POST   /{ad_set_id}/variants          -> create
/// ```
pub fn router() -> Router<AppState> {
    let variant_routes =
        Router::new().route("/", get(ad_variant::list_by_ad_set).post(ad_variant::create));

    Router::new()
        .route(
            "/{id}",
            get(ad_set::get_by_id)
                .put(ad_set::update)
                .delete(ad_set::delete),
        )
        .nest("/{ad_set_id}/variants", variant_routes)
}
