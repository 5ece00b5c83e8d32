//! Query-string parameter types shared across list endpoints.
//!
//! Pagination values are clamped in the repository layer, so these
//! structs pass the raw client values through as `Option`s.

use serde::Deserialize;

/// Standard `?limit=&offset=` pagination parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?include_removed=true` on asset listings: also return files that have
/// disappeared from Drive (kept for ad variants that still reference them).
#[derive(Debug, Default, Deserialize)]
pub struct IncludeRemovedParams {
    #[serde(default)]
    pub include_removed: bool,
}
