//! HTTP-level integration tests for the campaign, ad set, and ad variant
//! endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener. Response bodies arrive wrapped in the
//! `{"data": ...}` envelope.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_empty, post_json, put_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Campaign CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_campaign_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/campaigns",
        serde_json::json!({"name": "Spring Launch", "objective": "traffic"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Spring Launch");
    assert!(json["data"]["id"].is_number());
    assert_eq!(json["data"]["status"], "draft");
    assert_eq!(json["data"]["currency"], "USD");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_campaign_with_unknown_objective_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/campaigns",
        serde_json::json!({"name": "Brand Lift Q3", "objective": "brand_lift"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("Unknown objective"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_campaign_by_id(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let create_resp = post_json(
        app,
        "/api/v1/campaigns",
        serde_json::json!({"name": "Get Me", "objective": "awareness", "budget_cents": 250000}),
    )
    .await;
    let created = body_json(create_resp).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/campaigns/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Get Me");
    assert_eq!(json["data"]["budget_cents"], 250000);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_nonexistent_campaign_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/campaigns/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_campaign(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let create_resp = post_json(
        app,
        "/api/v1/campaigns",
        serde_json::json!({"name": "Original", "objective": "traffic"}),
    )
    .await;
    let created = body_json(create_resp).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/campaigns/{id}"),
        serde_json::json!({"name": "Updated", "status": "paused", "budget_cents": 10000}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Updated");
    assert_eq!(json["data"]["status"], "paused");
    assert_eq!(json["data"]["budget_cents"], 10000);
    // Untouched fields survive the partial update.
    assert_eq!(json["data"]["objective"], "traffic");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_campaign_rejects_unknown_status(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let create_resp = post_json(
        app,
        "/api/v1/campaigns",
        serde_json::json!({"name": "Status Check", "objective": "traffic"}),
    )
    .await;
    let created = body_json(create_resp).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/campaigns/{id}"),
        serde_json::json!({"status": "deleted"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Unknown campaign status"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_campaign_returns_204(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let create_resp = post_json(
        app,
        "/api/v1/campaigns",
        serde_json::json!({"name": "Delete Me", "objective": "traffic"}),
    )
    .await;
    let created = body_json(create_resp).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/campaigns/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Subsequent GET should 404.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/campaigns/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_campaigns_filters_by_status(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/campaigns",
        serde_json::json!({"name": "Draft One", "objective": "traffic"}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let create_resp = post_json(
        app,
        "/api/v1/campaigns",
        serde_json::json!({"name": "Paused One", "objective": "traffic"}),
    )
    .await;
    let created = body_json(create_resp).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    put_json(
        app,
        &format!("/api/v1/campaigns/{id}"),
        serde_json::json!({"status": "paused"}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/campaigns").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/campaigns?status=paused").await;
    let json = body_json(response).await;
    let arr = json["data"].as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["name"], "Paused One");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_campaigns_with_unknown_status_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/campaigns?status=running").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Ad sets (nested under campaigns)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_ad_set_under_campaign(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let campaign = body_json(
        post_json(
            app,
            "/api/v1/campaigns",
            serde_json::json!({"name": "Ad Set Parent", "objective": "conversions"}),
        )
        .await,
    )
    .await;
    let campaign_id = campaign["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/campaigns/{campaign_id}/ad-sets"),
        serde_json::json!({
            "name": "US Prospecting",
            "platform": "meta_ads",
            "budget_cents": 5000,
            "audience": {"geo_locations": {"countries": ["US"]}}
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "US Prospecting");
    assert_eq!(json["data"]["campaign_id"], campaign_id);
    assert_eq!(json["data"]["status"], "draft");
    assert!(json["data"]["remote_id"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_ad_set_with_unknown_platform_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let campaign = body_json(
        post_json(
            app,
            "/api/v1/campaigns",
            serde_json::json!({"name": "Platform Check", "objective": "traffic"}),
        )
        .await,
    )
    .await;
    let campaign_id = campaign["data"]["id"].as_i64().unwrap();

    // google_drive is a connectable provider but not a delivery platform.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/campaigns/{campaign_id}/ad-sets"),
        serde_json::json!({"name": "Nope", "platform": "google_drive"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Unknown delivery platform"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_ad_set_under_missing_campaign_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/campaigns/999999/ad-sets",
        serde_json::json!({"name": "Orphan", "platform": "meta_ads"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_ad_sets_for_campaign(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let campaign = body_json(
        post_json(
            app,
            "/api/v1/campaigns",
            serde_json::json!({"name": "List Sets", "objective": "traffic"}),
        )
        .await,
    )
    .await;
    let cid = campaign["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        &format!("/api/v1/campaigns/{cid}/ad-sets"),
        serde_json::json!({"name": "Meta Set", "platform": "meta_ads"}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        &format!("/api/v1/campaigns/{cid}/ad-sets"),
        serde_json::json!({"name": "TikTok Set", "platform": "tiktok_ads"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/campaigns/{cid}/ad-sets")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_ad_set_item_routes(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let campaign = body_json(
        post_json(
            app,
            "/api/v1/campaigns",
            serde_json::json!({"name": "Item Routes", "objective": "traffic"}),
        )
        .await,
    )
    .await;
    let cid = campaign["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let ad_set = body_json(
        post_json(
            app,
            &format!("/api/v1/campaigns/{cid}/ad-sets"),
            serde_json::json!({"name": "Retargeting", "platform": "meta_ads"}),
        )
        .await,
    )
    .await;
    let id = ad_set["data"]["id"].as_i64().unwrap();

    // GET /api/v1/ad-sets/{id}
    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/ad-sets/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    // PUT /api/v1/ad-sets/{id}
    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/ad-sets/{id}"),
        serde_json::json!({"name": "Retargeting v2", "status": "active"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Retargeting v2");
    assert_eq!(json["data"]["status"], "active");

    // DELETE, then GET should 404.
    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/ad-sets/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/ad-sets/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Ad variants (nested under ad sets)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_variant_crud_under_ad_set(pool: PgPool) {
    // Set up campaign and ad set through the repository layer to keep the
    // HTTP traffic focused on the variant endpoints.
    use adops_db::models::ad_set::CreateAdSet;
    use adops_db::models::campaign::CreateCampaign;
    use adops_db::repositories::{AdSetRepo, CampaignRepo};

    let campaign = CampaignRepo::create(
        &pool,
        &CreateCampaign {
            name: "Variant Parent".to_string(),
            description: None,
            objective: "traffic".to_string(),
            budget_cents: None,
            currency: None,
            start_date: None,
            end_date: None,
        },
    )
    .await
    .unwrap();
    let ad_set = AdSetRepo::create(
        &pool,
        campaign.id,
        &CreateAdSet {
            name: "Variant Set".to_string(),
            platform: "meta_ads".to_string(),
            budget_cents: None,
            audience: None,
        },
    )
    .await
    .unwrap();
    let ad_set_id = ad_set.id;

    // POST /api/v1/ad-sets/{ad_set_id}/variants
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/ad-sets/{ad_set_id}/variants"),
        serde_json::json!({
            "name": "Hero Image A",
            "headline": "Shoes that last",
            "landing_url": "https://example.com/shoes",
            "call_to_action": "Shop Now"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let variant = body_json(response).await;
    let variant_id = variant["data"]["id"].as_i64().unwrap();
    assert_eq!(variant["data"]["ad_set_id"], ad_set_id);
    assert_eq!(variant["data"]["headline"], "Shoes that last");

    // GET list under the ad set.
    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/ad-sets/{ad_set_id}/variants")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);

    // GET /api/v1/variants/{id}
    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/variants/{variant_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    // PUT /api/v1/variants/{id}
    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/variants/{variant_id}"),
        serde_json::json!({"primary_text": "Built for the long run.", "status": "active"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["primary_text"], "Built for the long run.");
    assert_eq!(json["data"]["status"], "active");

    // DELETE, then GET should 404.
    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/variants/{variant_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/variants/{variant_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_variant_with_missing_asset_returns_404(pool: PgPool) {
    use adops_db::models::ad_set::CreateAdSet;
    use adops_db::models::campaign::CreateCampaign;
    use adops_db::repositories::{AdSetRepo, CampaignRepo};

    let campaign = CampaignRepo::create(
        &pool,
        &CreateCampaign {
            name: "Asset Ref".to_string(),
            description: None,
            objective: "traffic".to_string(),
            budget_cents: None,
            currency: None,
            start_date: None,
            end_date: None,
        },
    )
    .await
    .unwrap();
    let ad_set = AdSetRepo::create(
        &pool,
        campaign.id,
        &CreateAdSet {
            name: "Asset Ref Set".to_string(),
            platform: "meta_ads".to_string(),
            budget_cents: None,
            audience: None,
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/ad-sets/{}/variants", ad_set.id),
        serde_json::json!({"name": "Broken Ref", "asset_id": 999999}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Asset"));
}

// ---------------------------------------------------------------------------
// Publish preconditions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_publish_campaign_without_ad_sets_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let campaign = body_json(
        post_json(
            app,
            "/api/v1/campaigns",
            serde_json::json!({"name": "Empty Publish", "objective": "traffic"}),
        )
        .await,
    )
    .await;
    let id = campaign["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_empty(app, &format!("/api/v1/campaigns/{id}/publish")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Campaign has no ad sets to publish");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_publish_archived_campaign_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let campaign = body_json(
        post_json(
            app,
            "/api/v1/campaigns",
            serde_json::json!({"name": "Archived", "objective": "traffic"}),
        )
        .await,
    )
    .await;
    let id = campaign["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    put_json(
        app,
        &format!("/api/v1/campaigns/{id}"),
        serde_json::json!({"status": "archived"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = post_empty(app, &format!("/api/v1/campaigns/{id}/publish")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Archived campaigns cannot be published");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_publish_without_connected_account_fails_the_ad_set(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let campaign = body_json(
        post_json(
            app,
            "/api/v1/campaigns",
            serde_json::json!({"name": "No Connection", "objective": "traffic"}),
        )
        .await,
    )
    .await;
    let id = campaign["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        &format!("/api/v1/campaigns/{id}/ad-sets"),
        serde_json::json!({"name": "Meta Set", "platform": "meta_ads"}),
    )
    .await;

    // Meta is not connected, so the ad set lands in the report as failed
    // rather than aborting the publish.
    let app = common::build_test_app(pool.clone());
    let response = post_empty(app, &format!("/api/v1/campaigns/{id}/publish")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let outcomes = json["data"]["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0]["status"], "failed");
    assert!(outcomes[0]["error"]
        .as_str()
        .unwrap()
        .contains("Meta Ads is not connected"));

    // Nothing went live, so the campaign stays in draft.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/campaigns/{id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "draft");
}

// ---------------------------------------------------------------------------
// Error response format
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_error_response_has_code_and_error_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/campaigns/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert!(json["error"].is_string(), "Error response should have 'error' field");
    assert!(json["code"].is_string(), "Error response should have 'code' field");
    assert_eq!(json["code"], "NOT_FOUND");
}
