//! adops event bus and activity-log infrastructure.
//!
//! Building blocks for the in-process event system:
//!
//! - [`EventBus`] — publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] — the canonical domain event envelope.
//! - [`EventPersistence`] — background service that writes every event
//!   to the `events` table, feeding the dashboard activity widget.
//!
//! Slack notification routing subscribes to the same bus but lives in
//! the API crate next to the webhook handlers.

pub mod bus;
pub mod persistence;

pub use bus::{EventBus, PlatformEvent};
pub use persistence::EventPersistence;
