//! Slack incoming-webhook notifier with exponential-backoff retry.
//!
//! [`SlackNotifier`] posts a JSON `{"text": …}` body to an incoming
//! webhook URL. Failed attempts are retried up to three times with
//! exponential backoff (1 s, 2 s, 4 s) before the error is returned to
//! the caller, which logs and drops it; notification delivery never
//! fails the operation that triggered it.

use std::time::Duration;

/// Retry delays in seconds (exponential backoff: 1s, 2s, 4s).
const RETRY_DELAYS_SECS: [u64; 3] = [1, 2, 4];

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for Slack delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum SlackError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Slack answered with a non-2xx status code.
    #[error("Slack webhook returned HTTP {0}")]
    HttpStatus(u16),
}

/// Delivers notification lines to Slack incoming webhooks.
pub struct SlackNotifier {
    client: reqwest::Client,
}

impl SlackNotifier {
    /// Create a notifier with a pre-configured HTTP client.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client }
    }

    /// Post a text message to an incoming-webhook URL with retry.
    ///
    /// Retries up to 3 times with exponential backoff before giving up.
    /// Returns `Ok(())` on the first successful attempt.
    pub async fn post_text(&self, webhook_url: &str, text: &str) -> Result<(), SlackError> {
        let payload = serde_json::json!({ "text": text });

        for (attempt, delay_secs) in RETRY_DELAYS_SECS.iter().enumerate() {
            match self.try_send(webhook_url, &payload).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        error = %e,
                        "Slack delivery attempt failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_secs(*delay_secs)).await;
                }
            }
        }

        // Final attempt after the last backoff.
        match self.try_send(webhook_url, &payload).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!(error = %e, "Slack delivery failed after all retries");
                Err(e)
            }
        }
    }

    /// Execute a single POST request and check the response status.
    async fn try_send(
        &self,
        webhook_url: &str,
        payload: &serde_json::Value,
    ) -> Result<(), SlackError> {
        let response = self.client.post(webhook_url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(SlackError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

impl Default for SlackNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_does_not_panic() {
        let _notifier = SlackNotifier::new();
    }

    #[test]
    fn slack_error_display_http_status() {
        let err = SlackError::HttpStatus(410);
        assert_eq!(err.to_string(), "Slack webhook returned HTTP 410");
    }

    #[test]
    fn slack_error_display_request() {
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = SlackError::Request(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
    }
}
