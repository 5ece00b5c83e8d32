pub mod ad_set;
pub mod ad_variant;
pub mod asset;
pub mod campaign;
pub mod connect;
pub mod dashboard;
pub mod health;
pub mod integration;
pub mod notification;
pub mod preference;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /campaigns                                       list, create
/// /campaigns/{id}                                  get, update, delete
/// /campaigns/{id}/publish                          push to delivery platforms (POST)
/// /campaigns/{campaign_id}/ad-sets                 list, create
///
/// /ad-sets/{id}                                    get, update, delete
/// /ad-sets/{ad_set_id}/variants                    list, create
///
/// /variants/{id}                                   get, update, delete
///
/// /assets/folders                                  list, create
/// /assets/folders/{id}                             get, update, delete
/// /assets/folders/{id}/assets                      list folder assets (?include_removed)
/// /assets/folders/{id}/sync                        run a sync now (POST)
/// /assets/folders/{id}/runs                        sync run history (GET)
/// /assets/{id}                                     get one asset
///
/// /integrations                                    list connection states
/// /integrations/{provider}/authorize               start OAuth (POST)
/// /integrations/{provider}/complete                finish OAuth (POST)
/// /integrations/{provider}/refresh                 force token refresh (POST)
/// /integrations/{provider}                         disconnect (DELETE)
///
/// /notifications/webhooks                          list, create
/// /notifications/webhooks/{id}                     update, delete
/// /notifications/webhooks/{id}/test                send a test message (POST)
///
/// /preferences                                     list
/// /preferences/{key}                               get, set, delete
///
/// /dashboard/summary                               entity counts + sync status
/// /dashboard/budget-by-platform                    active budget per platform
/// /dashboard/activity                              event feed (?prefix, limit, offset)
/// ```
///
/// `/health` and `/connect/{provider}/callback` mount at the server root,
/// not under `/api/v1` (see `main.rs`): OAuth redirect URIs are registered
/// with the providers and must not move with API versioning.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Campaign hierarchy (also nests ad set creation per campaign).
        .nest("/campaigns", campaign::router())
        // Ad set detail routes plus nested variant creation.
        .nest("/ad-sets", ad_set::router())
        // Ad variant detail routes.
        .nest("/variants", ad_variant::router())
        // Drive-synced asset folders, assets, and sync runs.
        .nest("/assets", asset::router())
        // OAuth connection lifecycle per provider.
        .nest("/integrations", integration::router())
        // Slack webhook registrations.
        .nest("/notifications", notification::router())
        // Dashboard key/value preferences.
        .nest("/preferences", preference::router())
        // Read-only dashboard widgets.
        .nest("/dashboard", dashboard::router())
}
