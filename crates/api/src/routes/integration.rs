//! Route definitions for the `/integrations` resource (OAuth lifecycle).

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::integration;
use crate::state::AppState;

/// Routes mounted at `/integrations`.
///
/// ```text
/// GET    /                              -> list
/// POST   /{provider}/authorize          -> authorize
/// POST   /{provider}/complete           -> complete
/// POST   /{provider}/refresh            -> refresh
/// DELETE /{provider}                    -> disconnect
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(integration::list))
        .route("/{provider}/authorize", post(integration::authorize))
        .route("/{provider}/complete", post(integration::complete))
        .route("/{provider}/refresh", post(integration::refresh))
        .route("/{provider}", delete(integration::disconnect))
}
