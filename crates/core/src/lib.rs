//! Shared domain types for the adops platform.
//!
//! This crate has no internal dependencies so it can be used from the
//! database layer, the connectors, the event bus, and the API server alike.

pub mod error;
pub mod events;
pub mod oauth;
pub mod pagination;
pub mod provider;
pub mod seal;
pub mod status;
pub mod types;

mod hex;
