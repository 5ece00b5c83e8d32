//! HTTP clients for the external platforms adops talks to.
//!
//! One module per provider (Google Drive, Meta Ads, TikTok Ads) plus the
//! Slack incoming-webhook notifier. Every client is a thin [`reqwest`]
//! wrapper with injectable endpoint bases so tests and sandboxed
//! deployments can point them at a stub server instead of the real
//! platform.

pub mod client;
pub mod google_drive;
pub mod meta_ads;
pub mod oauth;
pub mod slack;
pub mod tiktok_ads;

pub use client::ConnectorError;
pub use google_drive::{DriveFile, GoogleDriveClient};
pub use meta_ads::MetaAdsClient;
pub use oauth::TokenResponse;
pub use slack::{SlackError, SlackNotifier};
pub use tiktok_ads::TikTokAdsClient;
