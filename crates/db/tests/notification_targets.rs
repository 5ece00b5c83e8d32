//! Integration tests for the Slack webhook repository.
//!
//! Exercises registration defaults, the URL uniqueness rule, and the
//! delivery bookkeeping the notification router relies on.

use adops_db::models::slack_webhook::{CreateSlackWebhook, UpdateSlackWebhook};
use adops_db::repositories::SlackWebhookRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_webhook(label: &str, url: &str) -> CreateSlackWebhook {
    CreateSlackWebhook {
        label: label.to_string(),
        url: url.to_string(),
        is_enabled: None,
        event_prefixes: None,
    }
}

// ---------------------------------------------------------------------------
// Test: Registration defaults and uniqueness
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_webhook_defaults(pool: PgPool) {
    let hook = SlackWebhookRepo::create(
        &pool,
        &new_webhook("ops-alerts", "https://hooks.slack.com/services/T1/B1/x1"),
    )
    .await
    .unwrap();

    assert_eq!(hook.label, "ops-alerts");
    assert!(hook.is_enabled);
    assert_eq!(hook.event_prefixes, serde_json::json!([]));
    assert_eq!(hook.failure_count, 0);
    assert!(hook.last_notified_at.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_url_rejected(pool: PgPool) {
    let url = "https://hooks.slack.com/services/T1/B1/x1";
    SlackWebhookRepo::create(&pool, &new_webhook("first", url))
        .await
        .unwrap();
    let result = SlackWebhookRepo::create(&pool, &new_webhook("second", url)).await;
    assert!(result.is_err(), "Duplicate webhook URL should fail");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_ordered_by_label(pool: PgPool) {
    SlackWebhookRepo::create(
        &pool,
        &new_webhook("ops-alerts", "https://hooks.slack.com/services/T1/B1/x1"),
    )
    .await
    .unwrap();
    SlackWebhookRepo::create(
        &pool,
        &new_webhook("campaign-feed", "https://hooks.slack.com/services/T1/B2/x2"),
    )
    .await
    .unwrap();

    let hooks = SlackWebhookRepo::list(&pool).await.unwrap();
    assert_eq!(hooks.len(), 2);
    assert_eq!(hooks[0].label, "campaign-feed");
    assert_eq!(hooks[1].label, "ops-alerts");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_enabled_filters_disabled(pool: PgPool) {
    SlackWebhookRepo::create(
        &pool,
        &new_webhook("keep", "https://hooks.slack.com/services/T1/B1/x1"),
    )
    .await
    .unwrap();
    let muted = SlackWebhookRepo::create(
        &pool,
        &new_webhook("mute", "https://hooks.slack.com/services/T1/B2/x2"),
    )
    .await
    .unwrap();

    SlackWebhookRepo::update(
        &pool,
        muted.id,
        &UpdateSlackWebhook {
            label: None,
            url: None,
            is_enabled: Some(false),
            event_prefixes: None,
        },
    )
    .await
    .unwrap()
    .expect("Update should return the row");

    let enabled = SlackWebhookRepo::list_enabled(&pool).await.unwrap();
    assert_eq!(enabled.len(), 1);
    assert_eq!(enabled[0].label, "keep");

    let all = SlackWebhookRepo::list(&pool).await.unwrap();
    assert_eq!(all.len(), 2);
}

// ---------------------------------------------------------------------------
// Test: Prefix list replacement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_update_replaces_prefix_list(pool: PgPool) {
    let hook = SlackWebhookRepo::create(
        &pool,
        &CreateSlackWebhook {
            event_prefixes: Some(vec!["campaign.".to_string()]),
            ..new_webhook("feed", "https://hooks.slack.com/services/T1/B1/x1")
        },
    )
    .await
    .unwrap();
    assert_eq!(hook.prefixes(), vec!["campaign."]);

    let updated = SlackWebhookRepo::update(
        &pool,
        hook.id,
        &UpdateSlackWebhook {
            label: None,
            url: None,
            is_enabled: None,
            event_prefixes: Some(vec!["integration.".to_string(), "sync.failed".to_string()]),
        },
    )
    .await
    .unwrap()
    .expect("Update should return the row");

    assert_eq!(updated.prefixes(), vec!["integration.", "sync.failed"]);
}

// ---------------------------------------------------------------------------
// Test: Delivery bookkeeping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_delivery_bookkeeping(pool: PgPool) {
    let hook = SlackWebhookRepo::create(
        &pool,
        &new_webhook("ops", "https://hooks.slack.com/services/T1/B1/x1"),
    )
    .await
    .unwrap();

    SlackWebhookRepo::record_failure(&pool, hook.id).await.unwrap();
    SlackWebhookRepo::record_failure(&pool, hook.id).await.unwrap();

    let hook = SlackWebhookRepo::find_by_id(&pool, hook.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(hook.failure_count, 2);
    assert!(hook.last_notified_at.is_none());

    // One success clears the streak and stamps the delivery time.
    SlackWebhookRepo::record_success(&pool, hook.id).await.unwrap();

    let hook = SlackWebhookRepo::find_by_id(&pool, hook.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(hook.failure_count, 0);
    assert!(hook.last_notified_at.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_webhook(pool: PgPool) {
    let hook = SlackWebhookRepo::create(
        &pool,
        &new_webhook("gone", "https://hooks.slack.com/services/T1/B1/x1"),
    )
    .await
    .unwrap();

    assert!(SlackWebhookRepo::delete(&pool, hook.id).await.unwrap());
    assert!(!SlackWebhookRepo::delete(&pool, hook.id).await.unwrap());
}
