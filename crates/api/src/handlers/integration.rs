//! Handlers for the `/integrations` resource: the OAuth connection
//! lifecycle for Google Drive, Meta Ads, and TikTok Ads.
//!
//! The flow is popup-based: `authorize` hands the dashboard a provider
//! consent URL carrying a signed state token; the provider redirects the
//! popup to `/connect/{provider}/callback` (see [`super::connect`]), which
//! relays the query parameters back to the dashboard; the dashboard then
//! calls `complete` with the code and state to finish the exchange
//! server-side. Provider tokens never transit the browser.

use adops_core::error::CoreError;
use adops_core::events;
use adops_core::oauth;
use adops_core::provider::Provider;
use adops_core::types::Timestamp;
use adops_db::models::integration::{Integration, NewIntegration};
use adops_db::repositories::IntegrationRepo;
use adops_events::PlatformEvent;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use ts_rs::TS;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::tokens;

/// Response for the authorize endpoint: where to send the popup.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct AuthorizeResponse {
    /// Provider slug, as used in the REST paths.
    #[ts(type = "string")]
    pub provider: Provider,
    pub authorize_url: String,
    /// Echoed back by the provider; the dashboard passes it to `complete`.
    pub state: String,
}

/// Request body for the complete endpoint.
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct CompleteOAuth {
    pub code: String,
    pub state: String,
}

/// Everything a finished provider exchange yields, normalized across
/// providers before sealing and storage.
struct ConnectionMaterial {
    account_id: String,
    account_name: Option<String>,
    access_token: String,
    refresh_token: Option<String>,
    token_expires_at: Option<Timestamp>,
    scopes: String,
}

fn parse_provider(slug: &str) -> AppResult<Provider> {
    Provider::from_slug(slug).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!("Unknown provider: {slug}")))
    })
}

fn require_configured(state: &AppState, provider: Provider) -> AppResult<()> {
    let app = match provider {
        Provider::GoogleDrive => &state.config.integrations.google,
        Provider::MetaAds => &state.config.integrations.meta,
        Provider::TiktokAds => &state.config.integrations.tiktok,
    };
    if app.is_configured() {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "{} is not configured on this server",
            provider.display_name()
        ))))
    }
}

/// GET /api/v1/integrations
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Integration>>>> {
    let integrations = IntegrationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: integrations }))
}

/// POST /api/v1/integrations/{provider}/authorize
pub async fn authorize(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<AuthorizeResponse>>> {
    let provider = parse_provider(&slug)?;
    require_configured(&state, provider)?;

    let oauth_state = oauth::issue_state(&state.config.app_secret, provider);
    let redirect_uri = state.config.redirect_uri(provider);

    let authorize_url = match provider {
        Provider::GoogleDrive => state
            .connectors
            .google_drive
            .authorize_url(&redirect_uri, &oauth_state),
        Provider::MetaAds => state
            .connectors
            .meta_ads
            .authorize_url(&redirect_uri, &oauth_state),
        Provider::TiktokAds => state
            .connectors
            .tiktok_ads
            .authorize_url(&redirect_uri, &oauth_state),
    };

    Ok(Json(DataResponse {
        data: AuthorizeResponse {
            provider,
            authorize_url,
            state: oauth_state,
        },
    }))
}

/// POST /api/v1/integrations/{provider}/complete
///
/// Verifies the state token, exchanges the code, discovers the account
/// identity, seals the tokens, and upserts the connection. Nothing is
/// stored when any step fails.
pub async fn complete(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<CompleteOAuth>,
) -> AppResult<Json<DataResponse<Integration>>> {
    let provider = parse_provider(&slug)?;
    require_configured(&state, provider)?;

    oauth::verify_state(&state.config.app_secret, provider, &input.state)
        .map_err(|err| AppError::BadRequest(format!("OAuth state rejected: {err}")))?;

    let material = match provider {
        Provider::GoogleDrive => complete_google(&state, &input.code).await?,
        Provider::MetaAds => complete_meta(&state, &input.code).await?,
        Provider::TiktokAds => complete_tiktok(&state, &input.code).await?,
    };

    let access_token_sealed = state.seal_key.seal(&material.access_token)?;
    let refresh_token_sealed = material
        .refresh_token
        .as_deref()
        .map(|t| state.seal_key.seal(t))
        .transpose()?;

    let integration = IntegrationRepo::upsert(
        &state.pool,
        &NewIntegration {
            provider: provider.as_str().to_string(),
            account_id: material.account_id,
            account_name: material.account_name,
            access_token_sealed,
            refresh_token_sealed,
            token_expires_at: material.token_expires_at,
            scopes: material.scopes,
        },
    )
    .await?;

    state.event_bus.publish(
        PlatformEvent::new(events::INTEGRATION_CONNECTED)
            .with_source("integration", integration.id)
            .with_payload(json!({
                "provider": provider.as_str(),
                "account": integration
                    .account_name
                    .clone()
                    .unwrap_or_else(|| integration.account_id.clone()),
            })),
    );
    tracing::info!(provider = %provider, account = %integration.account_id, "Integration connected");

    Ok(Json(DataResponse { data: integration }))
}

async fn complete_google(state: &AppState, code: &str) -> AppResult<ConnectionMaterial> {
    let client = &state.connectors.google_drive;
    let redirect_uri = state.config.redirect_uri(Provider::GoogleDrive);

    let grant = client.exchange_code(code, &redirect_uri).await?;
    let identity = client.userinfo(&grant.access_token).await?;

    Ok(ConnectionMaterial {
        account_id: identity.email.clone().unwrap_or_else(|| "unknown".to_string()),
        account_name: identity.name.or(identity.email),
        token_expires_at: grant.expires_at(),
        scopes: grant
            .scope
            .clone()
            .unwrap_or_else(|| adops_connectors::google_drive::SCOPES.join(" ")),
        access_token: grant.access_token,
        refresh_token: grant.refresh_token,
    })
}

async fn complete_meta(state: &AppState, code: &str) -> AppResult<ConnectionMaterial> {
    let client = &state.connectors.meta_ads;
    let redirect_uri = state.config.redirect_uri(Provider::MetaAds);

    let grant = client.exchange_code(code, &redirect_uri).await?;
    let user = client.me(&grant.access_token).await?;
    let accounts = client.ad_accounts(&grant.access_token).await?;

    // Publishing needs an ad account to create objects under; a profile
    // without one cannot be used.
    let account = accounts.into_iter().next().ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "The Meta profile has no ad accounts to publish into".to_string(),
        ))
    })?;

    Ok(ConnectionMaterial {
        account_id: account.account_id,
        account_name: account.name.or(user.name),
        token_expires_at: grant.expires_at(),
        scopes: adops_connectors::meta_ads::SCOPES.to_string(),
        access_token: grant.access_token,
        refresh_token: None,
    })
}

async fn complete_tiktok(state: &AppState, code: &str) -> AppResult<ConnectionMaterial> {
    let client = &state.connectors.tiktok_ads;

    let grant = client.exchange_code(code).await?;
    let first_advertiser = grant.advertiser_ids.first().cloned().ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "The TikTok account has no advertiser accounts".to_string(),
        ))
    })?;

    let advertisers = client
        .advertiser_info(&grant.access_token, &grant.advertiser_ids)
        .await?;
    let account_name = advertisers
        .into_iter()
        .find(|a| a.advertiser_id == first_advertiser)
        .and_then(|a| a.name);

    Ok(ConnectionMaterial {
        account_id: first_advertiser,
        account_name,
        // TikTok Business tokens are long-lived and carry no expiry.
        token_expires_at: None,
        scopes: String::new(),
        access_token: grant.access_token,
        refresh_token: None,
    })
}

/// POST /api/v1/integrations/{provider}/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Integration>>> {
    let provider = parse_provider(&slug)?;

    let integration = IntegrationRepo::find_by_provider(&state.pool, provider.as_str())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "{} is not connected",
                provider.display_name()
            )))
        })?;

    let (integration, _) = tokens::refresh_integration(&state, integration).await?;
    Ok(Json(DataResponse { data: integration }))
}

/// DELETE /api/v1/integrations/{provider}
///
/// Revocation at the provider is best effort: losing the race against an
/// already-dead grant should not leave the row behind.
pub async fn disconnect(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    let provider = parse_provider(&slug)?;

    let integration = IntegrationRepo::find_by_provider(&state.pool, provider.as_str())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "{} is not connected",
                provider.display_name()
            )))
        })?;

    if provider == Provider::GoogleDrive {
        // Revoking either token kills the whole grant. Prefer the refresh
        // token since the access token may already be expired.
        let sealed = integration
            .refresh_token_sealed
            .as_deref()
            .unwrap_or(&integration.access_token_sealed);
        match state.seal_key.unseal(sealed) {
            Ok(token) => {
                if let Err(err) = state.connectors.google_drive.revoke(&token).await {
                    tracing::warn!(error = %err, "Google token revocation failed");
                }
            }
            Err(err) => tracing::warn!(error = %err, "Could not unseal token for revocation"),
        }
    }

    IntegrationRepo::delete_by_provider(&state.pool, provider.as_str()).await?;

    state.event_bus.publish(
        PlatformEvent::new(events::INTEGRATION_DISCONNECTED)
            .with_source("integration", integration.id)
            .with_payload(json!({ "provider": provider.as_str() })),
    );
    tracing::info!(provider = %provider, "Integration disconnected");

    Ok(StatusCode::NO_CONTENT)
}
