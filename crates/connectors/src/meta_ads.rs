//! Meta Marketing API client (Graph API).
//!
//! Covers the slice of the Graph API the publish flow needs: the OAuth
//! dialog and code exchange, identity and ad-account lookups, and
//! campaign / ad set / ad creation under `act_{account_id}`.

use serde::Deserialize;

use crate::client::ConnectorError;
use crate::oauth::TokenResponse;

const PROVIDER: &str = "Meta Ads";

/// Graph API version every path is pinned to.
pub const GRAPH_VERSION: &str = "v21.0";

/// Permissions requested in the OAuth dialog. Meta wants these
/// comma-separated, unlike Google's space-separated scopes.
pub const SCOPES: &str = "ads_management,ads_read,business_management";

const DEFAULT_AUTH_BASE: &str = "https://www.facebook.com";
const DEFAULT_API_BASE: &str = "https://graph.facebook.com";

/// HTTP client for the Meta Graph API.
pub struct MetaAdsClient {
    client: reqwest::Client,
    app_id: String,
    app_secret: String,
    auth_base: String,
    api_base: String,
}

/// Graph error envelope: `{"error": {"message", "type", "code"}}`.
#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    error: GraphError,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    message: String,
    #[serde(rename = "type", default)]
    error_type: Option<String>,
    #[serde(default)]
    code: Option<i64>,
}

impl GraphError {
    fn describe(&self) -> String {
        match (self.error_type.as_deref(), self.code) {
            (Some(kind), Some(code)) => format!("{} ({kind}, code {code})", self.message),
            _ => self.message.clone(),
        }
    }
}

/// The authenticated Meta user.
#[derive(Debug, Deserialize)]
pub struct MetaUser {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// One ad account the user can publish into.
#[derive(Debug, Clone, Deserialize)]
pub struct AdAccount {
    /// Prefixed id, e.g. `act_1234567890`.
    pub id: String,
    /// Bare numeric id, e.g. `1234567890`.
    pub account_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdAccountPage {
    #[serde(default)]
    data: Vec<AdAccount>,
}

/// Identifier returned by every Graph object-creation call.
#[derive(Debug, Deserialize)]
pub struct CreatedObject {
    pub id: String,
}

impl MetaAdsClient {
    /// Create a client for the real Graph endpoints.
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

    /// OAuth dialog URL the dashboard opens in a popup.
    pub fn authorize_url(&self, redirect_uri: &str, state: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.app_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", SCOPES)
            .append_pair("state", state)
            .finish();
        format!("{}/{}/dialog/oauth?{}", self.auth_base, GRAPH_VERSION, query)
    }

    /// Exchange an authorization code for an access token. The Graph
    /// token endpoint takes its parameters as a GET query string.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, ConnectorError> {
        let response = self
            .client
            .get(format!(
                "{}/{}/oauth/access_token",
                self.api_base, GRAPH_VERSION
            ))
            .query(&[
                ("client_id", self.app_id.as_str()),
                ("client_secret", self.app_secret.as_str()),
                ("redirect_uri", redirect_uri),
                ("code", code),
            ])
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Fetch the authenticated user's identity.
    pub async fn me(&self, access_token: &str) -> Result<MetaUser, ConnectorError> {
        let response = self
            .client
            .get(format!("{}/{}/me", self.api_base, GRAPH_VERSION))
            .query(&[("fields", "id,name"), ("access_token", access_token)])
            .send()
            .await?;

        Self::parse(response).await
    }

    /// List the ad accounts the user can publish into.
    pub async fn ad_accounts(&self, access_token: &str) -> Result<Vec<AdAccount>, ConnectorError> {
        let response = self
            .client
            .get(format!("{}/{}/me/adaccounts", self.api_base, GRAPH_VERSION))
            .query(&[
                ("fields", "id,account_id,name"),
                ("access_token", access_token),
            ])
            .send()
            .await?;

        let page: AdAccountPage = Self::parse(response).await?;
        Ok(page.data)
    }

    /// Create a campaign under `act_{account_id}`. Campaigns are created
    /// `PAUSED` so nothing spends until someone flips it on in Ads
    /// Manager.
    pub async fn create_campaign(
        &self,
        access_token: &str,
        account_id: &str,
        name: &str,
        objective: &str,
        daily_budget_cents: Option<i64>,
    ) -> Result<CreatedObject, ConnectorError> {
        let mut form: Vec<(&str, String)> = vec![
            ("name", name.to_string()),
            ("objective", objective.to_string()),
            ("status", "PAUSED".to_string()),
            // Mandatory even when empty.
            ("special_ad_categories", "[]".to_string()),
            ("access_token", access_token.to_string()),
        ];
        if let Some(budget) = daily_budget_cents {
            form.push(("daily_budget", budget.to_string()));
        }

        let response = self
            .client
            .post(format!(
                "{}/{}/act_{}/campaigns",
                self.api_base, GRAPH_VERSION, account_id
            ))
            .form(&form)
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Create an ad set under an existing remote campaign.
    pub async fn create_ad_set(
        &self,
        access_token: &str,
        account_id: &str,
        campaign_remote_id: &str,
        name: &str,
        optimization_goal: &str,
        daily_budget_cents: Option<i64>,
        targeting: &serde_json::Value,
    ) -> Result<CreatedObject, ConnectorError> {
        let mut form: Vec<(&str, String)> = vec![
            ("name", name.to_string()),
            ("campaign_id", campaign_remote_id.to_string()),
            ("billing_event", "IMPRESSIONS".to_string()),
            ("optimization_goal", optimization_goal.to_string()),
            ("targeting", targeting.to_string()),
            ("status", "PAUSED".to_string()),
            ("access_token", access_token.to_string()),
        ];
        if let Some(budget) = daily_budget_cents {
            form.push(("daily_budget", budget.to_string()));
        }

        let response = self
            .client
            .post(format!(
                "{}/{}/act_{}/adsets",
                self.api_base, GRAPH_VERSION, account_id
            ))
            .form(&form)
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Create an ad under an existing remote ad set.
    pub async fn create_ad(
        &self,
        access_token: &str,
        account_id: &str,
        ad_set_remote_id: &str,
        name: &str,
        creative: &serde_json::Value,
    ) -> Result<CreatedObject, ConnectorError> {
        let form: Vec<(&str, String)> = vec![
            ("name", name.to_string()),
            ("adset_id", ad_set_remote_id.to_string()),
            ("creative", creative.to_string()),
            ("status", "PAUSED".to_string()),
            ("access_token", access_token.to_string()),
        ];

        let response = self
            .client
            .post(format!(
                "{}/{}/act_{}/ads",
                self.api_base, GRAPH_VERSION, account_id
            ))
            .form(&form)
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Decode a Graph response. Non-2xx bodies usually carry the
    /// structured `{"error": …}` envelope; anything else falls back to
    /// the raw body.
    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ConnectorError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            if let Ok(parsed) = serde_json::from_str::<GraphErrorBody>(&body) {
                return Err(ConnectorError::Platform {
                    provider: PROVIDER,
                    message: parsed.error.describe(),
                });
            }
            return Err(ConnectorError::Api {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}
