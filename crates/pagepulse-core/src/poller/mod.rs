//! Concrete polling fragments that plug into the refresh registry.

pub mod content;
pub mod types;

pub use content::ContentPoller;
pub use types::{DEFAULT_POLL_INTERVAL, MAX_POLL_INTERVAL_SECS, PollState};
