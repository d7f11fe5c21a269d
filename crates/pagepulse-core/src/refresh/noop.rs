use tracing::debug;

use crate::refresh::errors::RefreshError;
use crate::refresh::traits::{MainContentRefresher, Refresher};
use crate::refresh::types::AfterRefresh;

/// Main-content refresher used when the page has not registered one.
///
/// There is no fragment to wait for, so `after_refresh_of` runs the
/// callback before returning.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMainRefresher;

impl Refresher for NoopMainRefresher {
    fn stop_refresh(&self) -> Result<(), RefreshError> {
        Ok(())
    }

    fn restart_refresh(&self) -> Result<(), RefreshError> {
        Ok(())
    }
}

impl MainContentRefresher for NoopMainRefresher {
    fn after_refresh_of(&self, fragment_id: &str, callback: AfterRefresh) {
        debug!(
            event = "core.refresh.after_refresh_immediate",
            fragment_id = fragment_id
        );
        callback();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_noop_runs_callback_synchronously() {
        let ran = Rc::new(Cell::new(0));
        let counter = Rc::clone(&ran);

        NoopMainRefresher.after_refresh_of("x", Box::new(move || counter.set(counter.get() + 1)));

        assert_eq!(ran.get(), 1);
    }

    #[test]
    fn test_noop_stop_and_restart_succeed() {
        assert!(NoopMainRefresher.stop_refresh().is_ok());
        assert!(NoopMainRefresher.restart_refresh().is_ok());
        assert_eq!(NoopMainRefresher.fragment_id(), None);
    }
}
