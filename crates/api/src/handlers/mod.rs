//! HTTP request handlers, one module per resource.

pub mod ad_set;
pub mod ad_variant;
pub mod asset;
pub mod campaign;
pub mod connect;
pub mod dashboard;
pub mod integration;
pub mod notification;
pub mod preference;
