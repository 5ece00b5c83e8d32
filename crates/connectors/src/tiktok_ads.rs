//! TikTok Business API client.
//!
//! TikTok wraps every response in a `{ code, message, data }` envelope
//! and signals errors through `code != 0` while still answering HTTP
//! 200, so decoding goes through [`TikTokAdsClient::parse`] rather than
//! plain status checks. Authenticated calls carry the token in an
//! `Access-Token` header.

use serde::Deserialize;

use crate::client::{self, ConnectorError};

const PROVIDER: &str = "TikTok Ads";

const DEFAULT_AUTH_BASE: &str = "https://business-api.tiktok.com";
const DEFAULT_API_BASE: &str = "https://business-api.tiktok.com";

/// HTTP client for the TikTok Business API (open_api v1.3).
pub struct TikTokAdsClient {
    client: reqwest::Client,
    app_id: String,
    app_secret: String,
    auth_base: String,
    api_base: String,
}

/// Response envelope every TikTok endpoint uses.
#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,
    message: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Payload of a successful `oauth2/access_token` call. TikTok business
/// tokens are long-lived and report no expiry.
#[derive(Debug, Deserialize)]
pub struct TikTokToken {
    pub access_token: String,
    /// Advertiser accounts the token is authorized for.
    #[serde(default)]
    pub advertiser_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AdvertiserList {
    #[serde(default)]
    list: Vec<Advertiser>,
}

/// One advertiser account from `advertiser/info`.
#[derive(Debug, Clone, Deserialize)]
pub struct Advertiser {
    pub advertiser_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Identifier returned by `campaign/create`.
#[derive(Debug, Deserialize)]
pub struct CreatedCampaign {
    pub campaign_id: String,
}

impl TikTokAdsClient {
    /// Create a client for the real TikTok endpoints.
    pub fn new(app_id: String, app_secret: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            app_id,
            app_secret,
            auth_base: DEFAULT_AUTH_BASE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Override the endpoint bases (tests point these at a stub server).
    pub fn with_bases(mut self, auth_base: String, api_base: String) -> Self {
        self.auth_base = auth_base;
        self.api_base = api_base;
        self
    }

    /// Consent portal URL the dashboard opens in a popup.
    pub fn authorize_url(&self, redirect_uri: &str, state: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("app_id", &self.app_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("state", state)
            .finish();
        format!("{}/portal/auth?{}", self.auth_base, query)
    }

    /// Exchange an authorization code for a long-lived access token.
    pub async fn exchange_code(&self, auth_code: &str) -> Result<TikTokToken, ConnectorError> {
        let body = serde_json::json!({
            "app_id": self.app_id,
            "secret": self.app_secret,
            "auth_code": auth_code,
        });

        let response = self
            .client
            .post(format!(
                "{}/open_api/v1.3/oauth2/access_token/",
                self.api_base
            ))
            .json(&body)
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Fetch names for the given advertiser accounts.
    pub async fn advertiser_info(
        &self,
        access_token: &str,
        advertiser_ids: &[String],
    ) -> Result<Vec<Advertiser>, ConnectorError> {
        // The ids parameter is a JSON array serialized into the query
        // string, per the Business API convention.
        let ids = serde_json::json!(advertiser_ids).to_string();

        let response = self
            .client
            .get(format!("{}/open_api/v1.3/advertiser/info/", self.api_base))
            .header("Access-Token", access_token)
            .query(&[("advertiser_ids", ids.as_str())])
            .send()
            .await?;

        let data: AdvertiserList = Self::parse(response).await?;
        Ok(data.list)
    }

    /// Create a campaign for an advertiser. TikTok takes daily budgets in
    /// whole currency units; omitting the budget creates an uncapped
    /// campaign.
    pub async fn create_campaign(
        &self,
        access_token: &str,
        advertiser_id: &str,
        name: &str,
        objective_type: &str,
        daily_budget: Option<f64>,
    ) -> Result<CreatedCampaign, ConnectorError> {
        let mut body = serde_json::json!({
            "advertiser_id": advertiser_id,
            "campaign_name": name,
            "objective_type": objective_type,
            "budget_mode": "BUDGET_MODE_INFINITE",
        });
        if let Some(budget) = daily_budget {
            body["budget_mode"] = "BUDGET_MODE_DAY".into();
            body["budget"] = budget.into();
        }

        let response = self
            .client
            .post(format!("{}/open_api/v1.3/campaign/create/", self.api_base))
            .header("Access-Token", access_token)
            .json(&body)
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Unwrap the TikTok envelope: check HTTP status, then the embedded
    /// `code`, then decode `data` into the expected type.
    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ConnectorError> {
        let response = client::ensure_success(PROVIDER, response).await?;
        let envelope: Envelope = response.json().await?;

        if envelope.code != 0 {
            return Err(ConnectorError::Platform {
                provider: PROVIDER,
                message: format!("{} (code {})", envelope.message, envelope.code),
            });
        }

        serde_json::from_value(envelope.data).map_err(|source| ConnectorError::Decode {
            provider: PROVIDER,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn authorize_url_points_at_the_portal() {
        let client = TikTokAdsClient::new("7123".to_string(), "shh".to_string());
        let url = client.authorize_url("https://app.example.com/cb", "state-token");

        assert!(url.starts_with("https://business-api.tiktok.com/portal/auth?"));
        assert!(url.contains("app_id=7123"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.example.com%2Fcb"));
        assert!(url.contains("state=state-token"));
    }

    #[test]
    fn zero_code_envelope_yields_data() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"code": 0, "message": "OK", "data": {"access_token": "tt-token", "advertiser_ids": ["111", "222"]}}"#,
        )
        .unwrap();

        assert_eq!(envelope.code, 0);
        let token: TikTokToken = serde_json::from_value(envelope.data).unwrap();
        assert_eq!(token.access_token, "tt-token");
        assert_eq!(token.advertiser_ids, vec!["111", "222"]);
    }

    #[test]
    fn nonzero_code_is_an_error_even_with_http_200() {
        // The envelope decodes fine; the code is what signals failure.
        let envelope: Envelope = serde_json::from_str(
            r#"{"code": 40105, "message": "Auth code has expired", "data": {}}"#,
        )
        .unwrap();

        assert_ne!(envelope.code, 0);
        assert_eq!(envelope.message, "Auth code has expired");
        // And the empty data payload would not decode into a token.
        assert_matches!(
            serde_json::from_value::<TikTokToken>(envelope.data),
            Err(_)
        );
    }
}
