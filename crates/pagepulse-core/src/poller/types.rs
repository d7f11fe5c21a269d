use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default polling interval for page fragments.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Longest accepted polling interval, in seconds (one day).
pub const MAX_POLL_INTERVAL_SECS: u64 = 86_400;

/// Run state of a polling fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollState {
    Running,
    Stopped,
}

impl PollState {
    pub fn is_running(&self) -> bool {
        matches!(self, PollState::Running)
    }
}
