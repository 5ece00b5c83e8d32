//! Proactive OAuth token refresh.
//!
//! Rotates refreshable access tokens shortly before they expire so that
//! scheduled syncs never start on a dead token. Providers without
//! refresh tokens are left alone; their expiry is surfaced lazily when a
//! call first needs them.

use std::time::Duration;

use adops_core::provider::Provider;
use adops_db::repositories::IntegrationRepo;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;
use crate::tokens;

/// How often the refresher scans for expiring tokens.
const REFRESH_TICK: Duration = Duration::from_secs(300);

/// Tokens expiring within this window get rotated on the next tick.
/// Must exceed the tick so no token can slip through a scan gap.
const REFRESH_WINDOW_SECS: i64 = 600;

/// Run the token refresh loop.
///
/// Runs until `cancel` is triggered.
pub async fn run(state: AppState, cancel: CancellationToken) {
    tracing::info!(
        tick_secs = REFRESH_TICK.as_secs(),
        window_secs = REFRESH_WINDOW_SECS,
        "Token refresh job started"
    );

    let mut interval = tokio::time::interval(REFRESH_TICK);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Token refresh job stopping");
                break;
            }
            _ = interval.tick() => {
                refresh_expiring(&state).await;
            }
        }
    }
}

/// One pass: refresh every connected integration close to expiry.
async fn refresh_expiring(state: &AppState) {
    let expiring = match IntegrationRepo::list_expiring(&state.pool, REFRESH_WINDOW_SECS).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, "Token refresh pass could not list expiring integrations");
            return;
        }
    };

    for integration in expiring {
        let refreshable = Provider::from_slug(&integration.provider)
            .map(Provider::supports_refresh)
            .unwrap_or(false);
        if !refreshable {
            // Long-lived grants (Meta, TikTok) cannot be rotated here;
            // valid_access_token marks them expired when they die.
            tracing::debug!(
                provider = %integration.provider,
                "Skipping non-refreshable integration near expiry"
            );
            continue;
        }

        let provider = integration.provider.clone();
        // refresh_integration flips the row to expired and publishes
        // integration.expired when the provider rejects the grant.
        if let Err(e) = tokens::refresh_integration(state, integration).await {
            tracing::warn!(provider = %provider, error = %e, "Scheduled token refresh failed");
        }
    }
}
