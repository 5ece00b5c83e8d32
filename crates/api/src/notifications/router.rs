//! Slack notification fan-out service.
//!
//! [`SlackRouter`] subscribes to the event bus and forwards matching
//! [`PlatformEvent`]s to every enabled Slack webhook whose prefix list
//! covers the event type. Delivery outcomes feed the per-webhook
//! bookkeeping columns (`last_notified_at`, `failure_count`); a failed
//! delivery never propagates past this task.
//!
//! The task deliberately holds no reference to the bus sender: it exits
//! when the [`EventBus`](adops_events::EventBus) is dropped at shutdown,
//! the same way the persistence task does.

use std::sync::Arc;

use adops_core::provider::Provider;
use adops_db::repositories::SlackWebhookRepo;
use adops_db::DbPool;
use adops_events::PlatformEvent;
use tokio::sync::broadcast;

use crate::state::Connectors;

/// Background service that forwards platform events to Slack.
pub struct SlackRouter;

impl SlackRouter {
    /// Run the routing loop until the event bus closes.
    pub async fn run(
        pool: DbPool,
        connectors: Arc<Connectors>,
        mut receiver: broadcast::Receiver<PlatformEvent>,
    ) {
        loop {
            match receiver.recv().await {
                Ok(event) => Self::route_event(&pool, &connectors, &event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Slack router lagged, some events were not forwarded"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, Slack router shutting down");
                    break;
                }
            }
        }
    }

    /// Deliver one event to every enabled webhook that subscribes to it.
    async fn route_event(pool: &DbPool, connectors: &Connectors, event: &PlatformEvent) {
        // slack.* events originate from webhook management itself;
        // forwarding them would echo every test message.
        if event.event_type.starts_with("slack.") {
            return;
        }

        let webhooks = match SlackWebhookRepo::list_enabled(pool).await {
            Ok(webhooks) => webhooks,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load Slack webhooks for routing");
                return;
            }
        };

        for webhook in webhooks {
            if !matches_prefixes(&webhook.prefixes(), &event.event_type) {
                continue;
            }

            let text = format_event(event);
            match connectors.slack.post_text(&webhook.url, &text).await {
                Ok(()) => {
                    if let Err(e) = SlackWebhookRepo::record_success(pool, webhook.id).await {
                        tracing::error!(
                            error = %e,
                            webhook_id = webhook.id,
                            "Failed to record Slack delivery success"
                        );
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        webhook_id = webhook.id,
                        label = %webhook.label,
                        event_type = %event.event_type,
                        "Slack notification delivery failed"
                    );
                    if let Err(e) = SlackWebhookRepo::record_failure(pool, webhook.id).await {
                        tracing::error!(
                            error = %e,
                            webhook_id = webhook.id,
                            "Failed to record Slack delivery failure"
                        );
                    }
                }
            }
        }
    }
}

/// Whether a webhook's prefix list selects an event type.
///
/// An empty list subscribes to everything; otherwise any prefix match
/// counts (`"campaign."` matches `campaign.published`, `"sync.failed"`
/// matches exactly that event).
pub fn matches_prefixes(prefixes: &[String], event_type: &str) -> bool {
    prefixes.is_empty() || prefixes.iter().any(|p| event_type.starts_with(p.as_str()))
}

/// Render an event as a one-line Slack message (mrkdwn).
///
/// Well-known event families get tailored lines; anything else falls
/// back to the event name plus its source entity.
pub fn format_event(event: &PlatformEvent) -> String {
    let p = &event.payload;
    match event.event_type.as_str() {
        "campaign.created" => format!(
            "New campaign *{}* created ({})",
            text(p, "name"),
            text(p, "objective")
        ),
        "campaign.updated" => format!("Campaign *{}* updated", text(p, "name")),
        "campaign.deleted" => format!("Campaign *{}* deleted", text(p, "name")),
        "campaign.published" => format!(
            ":rocket: Campaign *{}* published: {} ad set(s) live, {} skipped, {} failed",
            text(p, "name"),
            count(p, "published"),
            count(p, "skipped"),
            count(p, "failed")
        ),
        "sync.completed" => format!(
            ":arrows_counterclockwise: Drive sync finished for *{}*: {} new, {} updated, {} removed",
            text(p, "folder"),
            count(p, "imported"),
            count(p, "updated"),
            count(p, "removed")
        ),
        "sync.failed" => format!(
            ":x: Drive sync failed for *{}*: {}",
            text(p, "folder"),
            text(p, "error")
        ),
        "integration.connected" => format!(
            ":link: {} connected as {}",
            provider_display(p),
            text(p, "account")
        ),
        "integration.disconnected" => format!("{} disconnected", provider_display(p)),
        "integration.refreshed" => format!("{} access token refreshed", provider_display(p)),
        "integration.expired" => format!(
            ":warning: {} access token expired; reconnect to resume syncing and publishing",
            provider_display(p)
        ),
        other => match (&event.source_entity_type, text_opt(p, "name")) {
            (Some(entity), Some(name)) => format!("{other}: {entity} *{name}*"),
            (Some(entity), None) => format!("{other} ({entity})"),
            _ => other.to_string(),
        },
    }
}

fn text<'a>(payload: &'a serde_json::Value, key: &str) -> &'a str {
    payload[key].as_str().unwrap_or("unknown")
}

fn text_opt<'a>(payload: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    payload[key].as_str()
}

fn count(payload: &serde_json::Value, key: &str) -> i64 {
    payload[key].as_i64().unwrap_or(0)
}

/// Payloads carry the provider slug; show the display name when it parses.
fn provider_display(payload: &serde_json::Value) -> &'static str {
    text_opt(payload, "provider")
        .and_then(Provider::from_slug)
        .map(Provider::display_name)
        .unwrap_or("Unknown provider")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_prefix_list_matches_everything() {
        assert!(matches_prefixes(&[], "campaign.created"));
        assert!(matches_prefixes(&[], "sync.failed"));
    }

    #[test]
    fn prefixes_select_event_families() {
        let prefixes = vec!["campaign.".to_string(), "sync.failed".to_string()];
        assert!(matches_prefixes(&prefixes, "campaign.published"));
        assert!(matches_prefixes(&prefixes, "sync.failed"));
        assert!(!matches_prefixes(&prefixes, "sync.completed"));
        assert!(!matches_prefixes(&prefixes, "integration.connected"));
    }

    #[test]
    fn campaign_published_message_includes_counts() {
        let event = PlatformEvent::new("campaign.published").with_payload(json!({
            "name": "Spring Launch",
            "published": 2,
            "skipped": 1,
            "failed": 0,
        }));
        assert_eq!(
            format_event(&event),
            ":rocket: Campaign *Spring Launch* published: 2 ad set(s) live, 1 skipped, 0 failed"
        );
    }

    #[test]
    fn sync_failure_message_carries_the_error() {
        let event = PlatformEvent::new("sync.failed").with_payload(json!({
            "folder": "Q3 Creatives",
            "trigger": "auto",
            "error": "Google Drive returned HTTP 403",
        }));
        let text = format_event(&event);
        assert!(text.contains("Q3 Creatives"));
        assert!(text.contains("Google Drive returned HTTP 403"));
    }

    #[test]
    fn provider_slugs_render_as_display_names() {
        let event = PlatformEvent::new("integration.expired")
            .with_payload(json!({ "provider": "google_drive" }));
        assert!(format_event(&event).contains("Google Drive"));

        let event = PlatformEvent::new("integration.disconnected")
            .with_payload(json!({ "provider": "meta_ads" }));
        assert_eq!(format_event(&event), "Meta Ads disconnected");
    }

    #[test]
    fn unknown_events_fall_back_to_the_type_name() {
        let event = PlatformEvent::new("ad_set.created")
            .with_source("ad_set", 9)
            .with_payload(json!({ "name": "Lookalikes US", "platform": "meta_ads" }));
        assert_eq!(format_event(&event), "ad_set.created: ad_set *Lookalikes US*");

        let bare = PlatformEvent::new("something.else");
        assert_eq!(format_event(&bare), "something.else");
    }
}
