//! HTTP-level integration tests for the dashboard preference store.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, put_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_set_and_get_preference(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        "/api/v1/preferences/theme",
        serde_json::json!({"value": {"mode": "dark"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["pref_key"], "theme");
    assert_eq!(json["data"]["value"]["mode"], "dark");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/preferences/theme").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["value"]["mode"], "dark");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_set_replaces_value_wholesale(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    put_json(
        app,
        "/api/v1/preferences/campaigns.columns",
        serde_json::json!({"value": ["name", "status", "budget"]}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        "/api/v1/preferences/campaigns.columns",
        serde_json::json!({"value": ["name"]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/preferences/campaigns.columns").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["value"], serde_json::json!(["name"]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_missing_preference_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/preferences/never-set").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("No preference stored"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_set_with_blank_key_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/api/v1/preferences/%20",
        serde_json::json!({"value": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Preference key must not be empty");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_preferences(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    put_json(
        app,
        "/api/v1/preferences/theme",
        serde_json::json!({"value": "light"}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    put_json(
        app,
        "/api/v1/preferences/sidebar",
        serde_json::json!({"value": {"collapsed": true}}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/preferences").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_preference(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    put_json(
        app,
        "/api/v1/preferences/doomed",
        serde_json::json!({"value": 42}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, "/api/v1/preferences/doomed").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = delete(app, "/api/v1/preferences/doomed").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
