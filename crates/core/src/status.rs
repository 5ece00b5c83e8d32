//! Well-known status string constants.
//!
//! These must match the CHECK constraints on the corresponding TEXT
//! columns. Handlers validate inbound statuses against the allowed sets
//! instead of trusting the database to reject them with a 500.

/// Campaign lifecycle statuses (`campaigns.status`).
pub mod campaign {
    pub const DRAFT: &str = "draft";
    pub const ACTIVE: &str = "active";
    pub const PAUSED: &str = "paused";
    pub const ARCHIVED: &str = "archived";

    pub const ALL: &[&str] = &[DRAFT, ACTIVE, PAUSED, ARCHIVED];
}

/// Ad set / ad variant lifecycle statuses (`ad_sets.status`,
/// `ad_variants.status`).
pub mod ad {
    pub const DRAFT: &str = "draft";
    pub const ACTIVE: &str = "active";
    pub const PAUSED: &str = "paused";
    pub const ARCHIVED: &str = "archived";

    pub const ALL: &[&str] = &[DRAFT, ACTIVE, PAUSED, ARCHIVED];
}

/// Campaign objectives (`campaigns.objective`). Each maps onto a
/// platform-specific objective when the campaign is published.
pub mod objective {
    pub const AWARENESS: &str = "awareness";
    pub const TRAFFIC: &str = "traffic";
    pub const CONVERSIONS: &str = "conversions";
    pub const ENGAGEMENT: &str = "engagement";

    pub const ALL: &[&str] = &[AWARENESS, TRAFFIC, CONVERSIONS, ENGAGEMENT];
}

/// Integration connection statuses (`integrations.status`).
pub mod integration {
    pub const CONNECTED: &str = "connected";
    pub const EXPIRED: &str = "expired";
    pub const REVOKED: &str = "revoked";

    pub const ALL: &[&str] = &[CONNECTED, EXPIRED, REVOKED];
}

/// Drive sync run statuses (`sync_runs.status`).
pub mod sync_run {
    pub const RUNNING: &str = "running";
    pub const SUCCEEDED: &str = "succeeded";
    pub const FAILED: &str = "failed";
}

/// Drive sync triggers (`sync_runs.triggered_by`).
pub mod sync_trigger {
    pub const MANUAL: &str = "manual";
    pub const AUTO: &str = "auto";
}

/// `true` if `value` is one of the strings in `allowed`.
pub fn is_one_of(value: &str, allowed: &[&str]) -> bool {
    allowed.contains(&value)
}
