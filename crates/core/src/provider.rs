//! Third-party platform identifiers.
//!
//! A [`Provider`] names one of the external accounts a workspace can
//! connect. The slug form (`google_drive`, `meta_ads`, `tiktok_ads`) is
//! what the database, the REST paths, and the dashboard all exchange.

use serde::{Deserialize, Serialize};

/// An external platform the workspace can connect via OAuth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    GoogleDrive,
    MetaAds,
    TiktokAds,
}

/// All connectable providers, in display order.
pub const ALL_PROVIDERS: [Provider; 3] =
    [Provider::GoogleDrive, Provider::MetaAds, Provider::TiktokAds];

impl Provider {
    /// Stable slug used in URLs and the `integrations.provider` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::GoogleDrive => "google_drive",
            Provider::MetaAds => "meta_ads",
            Provider::TiktokAds => "tiktok_ads",
        }
    }

    /// Human-readable name for Slack messages and logs.
    pub fn display_name(self) -> &'static str {
        match self {
            Provider::GoogleDrive => "Google Drive",
            Provider::MetaAds => "Meta Ads",
            Provider::TiktokAds => "TikTok Ads",
        }
    }

    /// Whether the provider issues refresh tokens that this service
    /// rotates in the background. Meta and TikTok hand out long-lived
    /// access tokens instead.
    pub fn supports_refresh(self) -> bool {
        matches!(self, Provider::GoogleDrive)
    }

    /// Parse a slug back into a provider.
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "google_drive" => Some(Provider::GoogleDrive),
            "meta_ads" => Some(Provider::MetaAds),
            "tiktok_ads" => Some(Provider::TiktokAds),
            _ => None,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::from_slug(s).ok_or_else(|| UnknownProvider(s.to_string()))
    }
}

/// Error returned when a slug does not name a known provider.
#[derive(Debug, thiserror::Error)]
#[error("Unknown provider: {0}")]
pub struct UnknownProvider(pub String);

/// The delivery platforms an ad set can target. A subset of
/// [`ALL_PROVIDERS`]: Drive is a creative source, not a delivery channel.
pub const DELIVERY_PLATFORMS: [Provider; 2] = [Provider::MetaAds, Provider::TiktokAds];
