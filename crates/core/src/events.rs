//! Well-known platform event type names.
//!
//! These must match the values stored in the `events.event_type` column
//! and the prefixes configured on Slack webhooks. Names are dot-separated,
//! `entity.verb`.

pub const CAMPAIGN_CREATED: &str = "campaign.created";
pub const CAMPAIGN_UPDATED: &str = "campaign.updated";
pub const CAMPAIGN_DELETED: &str = "campaign.deleted";
pub const CAMPAIGN_PUBLISHED: &str = "campaign.published";

pub const AD_SET_CREATED: &str = "ad_set.created";
pub const AD_SET_UPDATED: &str = "ad_set.updated";
pub const AD_SET_DELETED: &str = "ad_set.deleted";

pub const AD_VARIANT_CREATED: &str = "ad_variant.created";
pub const AD_VARIANT_UPDATED: &str = "ad_variant.updated";
pub const AD_VARIANT_DELETED: &str = "ad_variant.deleted";

pub const INTEGRATION_CONNECTED: &str = "integration.connected";
pub const INTEGRATION_DISCONNECTED: &str = "integration.disconnected";
pub const INTEGRATION_REFRESHED: &str = "integration.refreshed";
pub const INTEGRATION_EXPIRED: &str = "integration.expired";

pub const SYNC_COMPLETED: &str = "sync.completed";
pub const SYNC_FAILED: &str = "sync.failed";

pub const SLACK_TEST: &str = "slack.test";
