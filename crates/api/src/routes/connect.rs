//! Route for the OAuth popup relay page.
//!
//! Mounted at the server root because the path is baked into the
//! redirect URIs registered with each provider.

use axum::routing::get;
use axum::Router;

use crate::handlers::connect;
use crate::state::AppState;

/// Routes mounted at `/` (root level, NOT under `/api/v1`).
///
/// ```text
/// GET    /connect/{provider}/callback   -> relay
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/connect/{provider}/callback", get(connect::relay))
}
