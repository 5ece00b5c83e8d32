//! Slack notification fan-out.

pub mod router;

pub use router::SlackRouter;
