//! Slack incoming-webhook entity model and DTOs.

use adops_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

/// A row from the `slack_webhooks` table.
///
/// **Note:** the webhook URL doubles as the credential, so it is never
/// serialized back to clients. `url_preview` on list responses is the
/// human-readable stand-in.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct SlackWebhook {
    pub id: DbId,
    pub label: String,
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub url: String,
    pub is_enabled: bool,
    /// JSON array of event-name prefixes, e.g. `["campaign.", "sync.failed"]`.
    /// An empty array subscribes to everything.
    pub event_prefixes: serde_json::Value,
    pub last_notified_at: Option<Timestamp>,
    pub failure_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SlackWebhook {
    /// Masked form of the URL safe to show in the dashboard: the first
    /// 40 characters, rest elided.
    pub fn url_preview(&self) -> String {
        match self.url.char_indices().nth(40) {
            Some((idx, _)) => format!("{}…", &self.url[..idx]),
            None => self.url.clone(),
        }
    }

    /// Event-name prefixes as a string list, tolerating malformed JSON.
    pub fn prefixes(&self) -> Vec<String> {
        self.event_prefixes
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// DTO for registering a Slack webhook.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct CreateSlackWebhook {
    pub label: String,
    pub url: String,
    pub is_enabled: Option<bool>,
    /// Event-name prefixes to subscribe to; empty or omitted means all.
    pub event_prefixes: Option<Vec<String>>,
}

/// DTO for updating a Slack webhook. All fields are optional.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct UpdateSlackWebhook {
    pub label: Option<String>,
    pub url: Option<String>,
    pub is_enabled: Option<bool>,
    pub event_prefixes: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn webhook(url: &str, prefixes: serde_json::Value) -> SlackWebhook {
        SlackWebhook {
            id: 1,
            label: "ops".into(),
            url: url.into(),
            is_enabled: true,
            event_prefixes: prefixes,
            last_notified_at: None,
            failure_count: 0,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn url_preview_truncates_long_urls() {
        let hook = webhook(
            "https://hooks.slack.com/services/T0000000/B0000000/XXXXXXXXXXXXXXXXXXXXXXXX",
            serde_json::json!([]),
        );
        let preview = hook.url_preview();
        assert!(preview.ends_with('…'));
        assert!(preview.len() < hook.url.len());
    }

    #[test]
    fn url_preview_keeps_short_urls() {
        let hook = webhook("https://hooks.slack.com/x", serde_json::json!([]));
        assert_eq!(hook.url_preview(), "https://hooks.slack.com/x");
    }

    #[test]
    fn prefixes_tolerates_non_array_json() {
        let hook = webhook("https://hooks.slack.com/x", serde_json::json!("oops"));
        assert!(hook.prefixes().is_empty());

        let hook = webhook(
            "https://hooks.slack.com/x",
            serde_json::json!(["campaign.", 42, "sync."]),
        );
        assert_eq!(hook.prefixes(), vec!["campaign.", "sync."]);
    }
}
