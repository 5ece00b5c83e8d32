//! HTTP-level integration tests for platform connections: the OAuth
//! authorize/complete lifecycle, refresh, disconnect, and the popup relay
//! page.
//!
//! No provider is ever called. Authorize only builds a URL; complete is
//! exercised up to state verification; disconnect is tested against Meta,
//! which has no revocation call.

mod common;

use adops_core::oauth;
use adops_core::provider::Provider;
use adops_db::models::integration::NewIntegration;
use adops_db::repositories::IntegrationRepo;
use axum::http::StatusCode;
use common::{body_json, delete, get, post_empty, post_json};
use sqlx::PgPool;

async fn seed_meta_connection(pool: &PgPool) {
    IntegrationRepo::upsert(
        pool,
        &NewIntegration {
            provider: "meta_ads".to_string(),
            account_id: "act_120330".to_string(),
            account_name: Some("Acme Media".to_string()),
            access_token_sealed: vec![7u8; 48],
            refresh_token_sealed: None,
            token_expires_at: None,
            scopes: "ads_management,ads_read".to_string(),
        },
    )
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Connection listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_integrations_empty(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/integrations").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_integrations_hides_sealed_tokens(pool: PgPool) {
    seed_meta_connection(&pool).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/integrations").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let row = &json["data"][0];
    assert_eq!(row["provider"], "meta_ads");
    assert_eq!(row["account_id"], "act_120330");
    assert_eq!(row["account_name"], "Acme Media");
    assert_eq!(row["status"], "connected");
    // Sealed token material must never serialize.
    assert!(row.get("access_token_sealed").is_none());
    assert!(row.get("refresh_token_sealed").is_none());
}

// ---------------------------------------------------------------------------
// Authorize
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_authorize_google_returns_consent_url(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_empty(app, "/api/v1/integrations/google_drive/authorize").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["provider"], "google_drive");

    let url = json["data"]["authorize_url"].as_str().unwrap();
    assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
    assert!(url.contains("client_id=google-client-id"));
    assert!(url.contains("connect%2Fgoogle_drive%2Fcallback"));

    // The signed state rides in both the URL and the response body.
    let state = json["data"]["state"].as_str().unwrap();
    assert!(!state.is_empty());
    assert!(url.contains("state="));
    assert!(oauth::verify_state(common::TEST_APP_SECRET, Provider::GoogleDrive, state).is_ok());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_authorize_unconfigured_provider_returns_400(pool: PgPool) {
    // The test config leaves TikTok without credentials.
    let app = common::build_test_app(pool);
    let response = post_empty(app, "/api/v1/integrations/tiktok_ads/authorize").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "TikTok Ads is not configured on this server");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_authorize_unknown_provider_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_empty(app, "/api/v1/integrations/linkedin/authorize").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Unknown provider: linkedin");
}

// ---------------------------------------------------------------------------
// Complete: state verification
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_complete_with_garbage_state_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/integrations/google_drive/complete",
        serde_json::json!({"code": "4/abc", "state": "not-a-state"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("OAuth state rejected"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_complete_rejects_state_minted_for_another_provider(pool: PgPool) {
    let state = oauth::issue_state(common::TEST_APP_SECRET, Provider::MetaAds);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/integrations/google_drive/complete",
        serde_json::json!({"code": "4/abc", "state": state}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("signature mismatch"));
}

// ---------------------------------------------------------------------------
// Refresh and disconnect
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_without_connection_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_empty(app, "/api/v1/integrations/google_drive/refresh").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Google Drive is not connected");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_meta_connection_returns_400(pool: PgPool) {
    seed_meta_connection(&pool).await;

    // Meta grants are long-lived and have no refresh flow.
    let app = common::build_test_app(pool);
    let response = post_empty(app, "/api/v1/integrations/meta_ads/refresh").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("cannot be refreshed"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_disconnect_without_connection_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = delete(app, "/api/v1/integrations/meta_ads").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Meta Ads is not connected");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_disconnect_meta_removes_connection(pool: PgPool) {
    seed_meta_connection(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, "/api/v1/integrations/meta_ads").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/integrations").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Popup relay page
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_relay_page_targets_dashboard_origin(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/connect/meta_ads/callback?code=AQD123&state=xyz").await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("postMessage"));
    assert!(html.contains(r#"type: "adops:oauth""#));
    assert!(html.contains(r#"provider: "meta_ads""#));
    // The message target is pinned to the configured dashboard origin.
    assert!(html.contains(r#""http://localhost:5173""#));
    // Both the query string and the fragment are forwarded; TikTok returns
    // auth codes in the fragment.
    assert!(html.contains("window.location.search"));
    assert!(html.contains("window.location.hash"));
    // Opened outside the dashboard there is no opener to message.
    assert!(html.contains("opened outside the dashboard"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_relay_unknown_provider_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/connect/dropbox/callback").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
