//! Default values for configuration fields left unset.

use crate::poller::DEFAULT_POLL_INTERVAL;
use crate::refresh::BroadcastPolicy;

/// Returns the default refresh interval in seconds.
pub fn default_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL.as_secs()
}

pub fn default_broadcast_policy() -> BroadcastPolicy {
    BroadcastPolicy::Isolate
}
