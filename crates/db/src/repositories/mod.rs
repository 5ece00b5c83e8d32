//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod ad_set_repo;
pub mod ad_variant_repo;
pub mod asset_folder_repo;
pub mod asset_repo;
pub mod campaign_repo;
pub mod dashboard_repo;
pub mod event_repo;
pub mod integration_repo;
pub mod preference_repo;
pub mod slack_webhook_repo;
pub mod sync_run_repo;

pub use ad_set_repo::AdSetRepo;
pub use ad_variant_repo::AdVariantRepo;
pub use asset_folder_repo::AssetFolderRepo;
pub use asset_repo::AssetRepo;
pub use campaign_repo::CampaignRepo;
pub use dashboard_repo::DashboardRepo;
pub use event_repo::EventRepo;
pub use integration_repo::IntegrationRepo;
pub use preference_repo::PreferenceRepo;
pub use slack_webhook_repo::SlackWebhookRepo;
pub use sync_run_repo::SyncRunRepo;
