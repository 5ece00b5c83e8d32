//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Entity and DTO structs derive [`ts_rs::TS`] so the dashboard frontend
//! can regenerate its TypeScript types from this crate.

pub mod ad_set;
pub mod ad_variant;
pub mod asset;
pub mod asset_folder;
pub mod campaign;
pub mod dashboard;
pub mod event;
pub mod integration;
pub mod preference;
pub mod slack_webhook;
pub mod sync_run;
