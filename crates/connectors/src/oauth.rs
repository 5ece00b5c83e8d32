//! OAuth2 token grant types shared by the provider clients.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::client::{self, ConnectorError};

/// Token endpoint response, shared by the authorization-code and refresh
/// grants. Providers omit fields freely: Google only returns a
/// `refresh_token` on first consent, Meta never returns one at all.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl TokenResponse {
    /// Absolute expiry computed from `expires_in`, or `None` for tokens
    /// that do not report a lifetime.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs))
    }
}

/// POST a form-encoded grant to `token_url` and decode the response.
/// Both Google grants (`authorization_code` and `refresh_token`) go
/// through here.
pub(crate) async fn post_token_form(
    provider: &'static str,
    client: &reqwest::Client,
    token_url: &str,
    form: &[(&str, &str)],
) -> Result<TokenResponse, ConnectorError> {
    let response = client.post(token_url).form(form).send().await?;
    client::parse_json(provider, response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_tolerates_missing_optionals() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"access_token": "abc"}"#).unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.refresh_token, None);
        assert_eq!(token.expires_in, None);
        assert!(token.expires_at().is_none());
    }

    #[test]
    fn expires_at_is_relative_to_now() {
        let token: TokenResponse = serde_json::from_str(
            r#"{"access_token": "abc", "refresh_token": "def", "expires_in": 3600}"#,
        )
        .unwrap();

        let expires_at = token.expires_at().unwrap();
        let delta = expires_at - Utc::now();
        assert!(delta > Duration::seconds(3590) && delta <= Duration::seconds(3600));
    }
}
