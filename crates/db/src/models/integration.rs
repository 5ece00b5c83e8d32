//! Platform integration (OAuth connection) entity model.

use adops_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

/// A row from the `integrations` table.
///
/// **Note:** the sealed token columns are never serialized to responses;
/// handlers that need the plaintext go through the seal key explicitly.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Integration {
    pub id: DbId,
    pub provider: String,
    pub account_id: String,
    pub account_name: Option<String>,
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub access_token_sealed: Vec<u8>,
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub refresh_token_sealed: Option<Vec<u8>>,
    pub token_expires_at: Option<Timestamp>,
    /// Space-separated scope list as granted by the provider.
    pub scopes: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Connection material produced by a completed OAuth exchange.
///
/// Tokens arrive already sealed; this crate never sees plaintext secrets.
#[derive(Debug, Clone)]
pub struct NewIntegration {
    pub provider: String,
    pub account_id: String,
    pub account_name: Option<String>,
    pub access_token_sealed: Vec<u8>,
    pub refresh_token_sealed: Option<Vec<u8>>,
    pub token_expires_at: Option<Timestamp>,
    pub scopes: String,
}
