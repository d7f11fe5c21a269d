//! Registry of the polling fragments active on the current page.

use std::rc::Rc;

use tracing::{debug, error, info, warn};

use crate::refresh::errors::RefreshError;
use crate::refresh::noop::NoopMainRefresher;
use crate::refresh::traits::{MainContentRefresher, Refresher};
use crate::refresh::types::{BroadcastFailure, BroadcastKind, BroadcastPolicy, BroadcastReport};

/// A registered handle. Main-content refreshers keep their own trait object
/// so a `dyn MainContentRefresher` can be registered as-is.
enum Registration {
    Plain(Rc<dyn Refresher>),
    Main(Rc<dyn MainContentRefresher>),
}

impl Registration {
    fn stop_refresh(&self) -> Result<(), RefreshError> {
        match self {
            Registration::Plain(r) => r.stop_refresh(),
            Registration::Main(r) => r.stop_refresh(),
        }
    }

    fn restart_refresh(&self) -> Result<(), RefreshError> {
        match self {
            Registration::Plain(r) => r.restart_refresh(),
            Registration::Main(r) => r.restart_refresh(),
        }
    }

    fn fragment_id(&self) -> Option<&str> {
        match self {
            Registration::Plain(r) => r.fragment_id(),
            Registration::Main(r) => r.fragment_id(),
        }
    }
}

/// Ordered directory of refreshers plus the designated main-content refresher.
///
/// Registration order is kept and duplicates are allowed: a refresher added
/// twice is stopped and restarted twice. Only [`clear`](Self::clear) removes
/// entries.
pub struct RefreshRegistry {
    refreshers: Vec<Registration>,
    main: Rc<dyn MainContentRefresher>,
    policy: BroadcastPolicy,
}

impl Default for RefreshRegistry {
    fn default() -> Self {
        Self::new(BroadcastPolicy::default())
    }
}

impl RefreshRegistry {
    pub fn new(policy: BroadcastPolicy) -> Self {
        Self {
            refreshers: Vec::new(),
            main: Rc::new(NoopMainRefresher),
            policy,
        }
    }

    pub fn policy(&self) -> BroadcastPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.refreshers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refreshers.is_empty()
    }

    /// Stop every registered refresher, in registration order.
    pub fn disable_ajax(&self) -> Result<BroadcastReport, RefreshError> {
        self.broadcast(BroadcastKind::Stop)
    }

    /// Restart every registered refresher, in registration order.
    pub fn enable_ajax(&self) -> Result<BroadcastReport, RefreshError> {
        self.broadcast(BroadcastKind::Restart)
    }

    /// The current main-content refresher. Never absent.
    pub fn main(&self) -> Rc<dyn MainContentRefresher> {
        Rc::clone(&self.main)
    }

    /// Append a refresher that is not the main-content one.
    pub fn add_refresher(&mut self, refresher: Rc<dyn Refresher>) {
        debug!(
            event = "core.refresh.refresher_added",
            fragment_id = refresher.fragment_id(),
            is_main = false,
            position = self.refreshers.len()
        );
        self.refreshers.push(Registration::Plain(refresher));
    }

    /// Append a refresher and make it the main-content refresher.
    ///
    /// The superseded main refresher stays in the list and keeps receiving
    /// broadcasts. Accepts concrete handles and `dyn` handles alike, so the
    /// value returned by [`main`](Self::main) can be registered again.
    pub fn add_main_refresher(&mut self, refresher: Rc<dyn MainContentRefresher>) {
        debug!(
            event = "core.refresh.refresher_added",
            fragment_id = refresher.fragment_id(),
            is_main = true,
            position = self.refreshers.len()
        );
        self.main = Rc::clone(&refresher);
        self.refreshers.push(Registration::Main(refresher));
    }

    /// Forget every refresher and fall back to the no-op main refresher.
    pub fn clear(&mut self) {
        info!(event = "core.refresh.registry_cleared", removed = self.refreshers.len());
        self.main = Rc::new(NoopMainRefresher);
        self.refreshers.clear();
    }

    fn broadcast(&self, kind: BroadcastKind) -> Result<BroadcastReport, RefreshError> {
        info!(
            event = "core.refresh.broadcast_started",
            kind = kind.as_str(),
            count = self.refreshers.len(),
            policy = self.policy.as_str()
        );

        let mut report = BroadcastReport::new(kind);

        for (index, refresher) in self.refreshers.iter().enumerate() {
            let result = match kind {
                BroadcastKind::Stop => refresher.stop_refresh(),
                BroadcastKind::Restart => refresher.restart_refresh(),
            };
            report.invoked += 1;

            let Err(e) = result else {
                continue;
            };

            match self.policy {
                BroadcastPolicy::Isolate => {
                    warn!(
                        event = "core.refresh.broadcast_refresher_failed",
                        kind = kind.as_str(),
                        index = index,
                        fragment_id = refresher.fragment_id(),
                        error = %e
                    );
                    report.failures.push(BroadcastFailure {
                        index,
                        fragment_id: refresher.fragment_id().map(str::to_string),
                        error: e,
                    });
                }
                BroadcastPolicy::Abort => {
                    error!(
                        event = "core.refresh.broadcast_aborted",
                        kind = kind.as_str(),
                        index = index,
                        fragment_id = refresher.fragment_id(),
                        error = %e
                    );
                    return Err(RefreshError::BroadcastAborted {
                        kind,
                        index,
                        source: Box::new(e),
                    });
                }
            }
        }

        info!(
            event = "core.refresh.broadcast_completed",
            kind = kind.as_str(),
            invoked = report.invoked,
            failed = report.failures.len()
        );

        Ok(report)
    }
}
