//! Refresher capability traits.

use crate::refresh::errors::RefreshError;
use crate::refresh::types::AfterRefresh;

/// A handle that owns the periodic re-fetch cycle of one page fragment.
///
/// The registry only forwards calls; what stopping and restarting mean is
/// up to the implementation. Both methods take `&self` because handles are
/// shared between the registry and the page component that created them.
pub trait Refresher {
    /// Pause the polling cycle.
    fn stop_refresh(&self) -> Result<(), RefreshError>;

    /// Resume a polling cycle paused by `stop_refresh`.
    fn restart_refresh(&self) -> Result<(), RefreshError>;

    /// Label used in logs and broadcast failure reports.
    fn fragment_id(&self) -> Option<&str> {
        None
    }
}

/// The refresher responsible for the page's primary fragment.
pub trait MainContentRefresher: Refresher {
    /// Run `callback` once `fragment_id` completes its next refresh cycle.
    fn after_refresh_of(&self, fragment_id: &str, callback: AfterRefresh);
}
