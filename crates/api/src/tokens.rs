//! Access to sealed provider tokens, including just-in-time refresh.
//!
//! Everything that calls out to a platform on a stored grant goes through
//! [`valid_access_token`]: it unseals the stored access token and, for
//! providers that support it, swaps in a fresh one when the stored token
//! is at or near expiry.

use adops_core::error::CoreError;
use adops_core::events;
use adops_core::provider::Provider;
use adops_core::status;
use adops_db::models::integration::Integration;
use adops_db::repositories::IntegrationRepo;
use adops_events::PlatformEvent;
use chrono::{Duration, Utc};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Tokens this close to expiry are treated as already expired, so a
/// platform call never races the provider's clock.
const EXPIRY_SKEW_SECS: i64 = 60;

/// Fetch the connected integration for `provider` and a usable plaintext
/// access token, refreshing first if the stored one is stale.
pub async fn valid_access_token(
    state: &AppState,
    provider: Provider,
) -> AppResult<(Integration, String)> {
    let integration = IntegrationRepo::find_by_provider(&state.pool, provider.as_str())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "{} is not connected",
                provider.display_name()
            )))
        })?;

    if !is_stale(&integration) {
        let token = state.seal_key.unseal(&integration.access_token_sealed)?;
        return Ok((integration, token));
    }

    if !provider.supports_refresh() {
        IntegrationRepo::set_status(&state.pool, provider.as_str(), status::integration::EXPIRED)
            .await?;
        return Err(AppError::Core(CoreError::Validation(format!(
            "{} access token has expired; reconnect the account",
            provider.display_name()
        ))));
    }

    refresh_integration(state, integration).await
}

/// Trade the stored refresh token for new token material, reseal it, and
/// publish `integration.refreshed`. On a provider rejection the
/// connection is flipped to `expired` and `integration.expired` goes out
/// so the dashboard can prompt a reconnect.
pub async fn refresh_integration(
    state: &AppState,
    integration: Integration,
) -> AppResult<(Integration, String)> {
    let provider = Provider::from_slug(&integration.provider).ok_or_else(|| {
        AppError::InternalError(format!("Unknown provider stored: {}", integration.provider))
    })?;

    if !provider.supports_refresh() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "{} tokens cannot be refreshed; reconnect the account instead",
            provider.display_name()
        ))));
    }

    let refresh_sealed = integration.refresh_token_sealed.as_ref().ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "{} connection has no refresh token; reconnect the account",
            provider.display_name()
        )))
    })?;
    let refresh_token = state.seal_key.unseal(refresh_sealed)?;

    let refreshed = match state.connectors.google_drive.refresh(&refresh_token).await {
        Ok(tokens) => tokens,
        Err(err) => {
            tracing::warn!(provider = %provider, error = %err, "Token refresh rejected");
            IntegrationRepo::set_status(
                &state.pool,
                provider.as_str(),
                status::integration::EXPIRED,
            )
            .await?;
            state.event_bus.publish(
                PlatformEvent::new(events::INTEGRATION_EXPIRED)
                    .with_source("integration", integration.id)
                    .with_payload(json!({ "provider": provider.as_str() })),
            );
            return Err(AppError::Connector(err));
        }
    };

    let access_sealed = state.seal_key.seal(&refreshed.access_token)?;
    let refresh_sealed = refreshed
        .refresh_token
        .as_deref()
        .map(|t| state.seal_key.seal(t))
        .transpose()?;

    let updated = IntegrationRepo::update_tokens(
        &state.pool,
        integration.id,
        &access_sealed,
        refresh_sealed.as_deref(),
        refreshed.expires_at(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Integration",
        id: integration.id,
    }))?;

    state.event_bus.publish(
        PlatformEvent::new(events::INTEGRATION_REFRESHED)
            .with_source("integration", updated.id)
            .with_payload(json!({ "provider": provider.as_str() })),
    );
    tracing::info!(provider = %provider, "Access token refreshed");

    Ok((updated, refreshed.access_token))
}

/// A token with no recorded expiry never goes stale (long-lived grants).
fn is_stale(integration: &Integration) -> bool {
    match integration.token_expires_at {
        Some(expires_at) => expires_at - Duration::seconds(EXPIRY_SKEW_SECS) <= Utc::now(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integration_expiring_in(secs: i64) -> Integration {
        Integration {
            id: 1,
            provider: "google_drive".into(),
            account_id: "ops@example.com".into(),
            account_name: None,
            access_token_sealed: vec![0u8; 32],
            refresh_token_sealed: None,
            token_expires_at: Some(Utc::now() + Duration::seconds(secs)),
            scopes: String::new(),
            status: "connected".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn token_within_skew_window_is_stale() {
        assert!(is_stale(&integration_expiring_in(30)));
        assert!(is_stale(&integration_expiring_in(-10)));
    }

    #[test]
    fn fresh_token_is_not_stale() {
        assert!(!is_stale(&integration_expiring_in(3600)));
    }

    #[test]
    fn token_without_expiry_is_never_stale() {
        let mut integration = integration_expiring_in(0);
        integration.token_expires_at = None;
        assert!(!is_stale(&integration));
    }
}
