use std::sync::Arc;

use adops_connectors::{GoogleDriveClient, MetaAdsClient, SlackNotifier, TikTokAdsClient};
use adops_core::seal::SealKey;

use crate::config::{OAuthAppConfig, ServerConfig};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: adops_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Centralized event bus for publishing platform events.
    pub event_bus: Arc<adops_events::EventBus>,
    /// HTTP clients for the external platforms.
    pub connectors: Arc<Connectors>,
    /// AES key sealing provider tokens at rest.
    pub seal_key: Arc<SealKey>,
}

/// The platform clients, built once from config and shared.
pub struct Connectors {
    pub google_drive: GoogleDriveClient,
    pub meta_ads: MetaAdsClient,
    pub tiktok_ads: TikTokAdsClient,
    pub slack: SlackNotifier,
}

impl Connectors {
    /// Build every client from its configured credentials, applying
    /// endpoint-base overrides where set.
    pub fn from_config(config: &ServerConfig) -> Self {
        let google = &config.integrations.google;
        let mut google_drive =
            GoogleDriveClient::new(google.client_id.clone(), google.client_secret.clone());
        if let Some((auth, token, api)) = all_three_bases(google) {
            google_drive = google_drive.with_bases(auth, token, api);
        }

        let meta = &config.integrations.meta;
        let mut meta_ads = MetaAdsClient::new(meta.client_id.clone(), meta.client_secret.clone());
        if let (Some(auth), Some(api)) = (meta.auth_base.clone(), meta.api_base.clone()) {
            meta_ads = meta_ads.with_bases(auth, api);
        }

        let tiktok = &config.integrations.tiktok;
        let mut tiktok_ads =
            TikTokAdsClient::new(tiktok.client_id.clone(), tiktok.client_secret.clone());
        if let (Some(auth), Some(api)) = (tiktok.auth_base.clone(), tiktok.api_base.clone()) {
            tiktok_ads = tiktok_ads.with_bases(auth, api);
        }

        Self {
            google_drive,
            meta_ads,
            tiktok_ads,
            slack: SlackNotifier::new(),
        }
    }
}

/// Google's flow spans three hosts; overrides only apply as a full set so
/// a partially overridden client never mixes stub and live endpoints.
fn all_three_bases(app: &OAuthAppConfig) -> Option<(String, String, String)> {
    match (&app.auth_base, &app.token_base, &app.api_base) {
        (Some(auth), Some(token), Some(api)) => Some((auth.clone(), token.clone(), api.clone())),
        _ => None,
    }
}
