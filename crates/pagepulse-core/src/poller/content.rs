use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::poller::types::PollState;
use crate::refresh::{AfterRefresh, MainContentRefresher, RefreshError, Refresher};

/// Polls one or more page fragments on a fixed interval.
///
/// The poller does not fetch anything itself: whoever performs the fetch
/// reports a finished cycle through [`complete_cycle`](Self::complete_cycle),
/// which is also when queued `after_refresh_of` callbacks fire.
pub struct ContentPoller {
    fragments: Vec<String>,
    interval: Duration,
    state: Cell<PollState>,
    next_due: Cell<Option<Instant>>,
    cycles: RefCell<HashMap<String, u64>>,
    pending: RefCell<HashMap<String, Vec<AfterRefresh>>>,
}

impl ContentPoller {
    /// Create a running poller for a single fragment.
    pub fn new(fragment_id: impl Into<String>, interval: Duration) -> Self {
        Self::with_fragments([fragment_id.into()], interval)
    }

    /// Create a running poller covering several fragments.
    pub fn with_fragments<I, S>(fragments: I, interval: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fragments: Vec<String> = fragments.into_iter().map(Into::into).collect();
        Self {
            fragments,
            interval,
            state: Cell::new(PollState::Running),
            next_due: Cell::new(Instant::now().checked_add(interval)),
            cycles: RefCell::new(HashMap::new()),
            pending: RefCell::new(HashMap::new()),
        }
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> PollState {
        self.state.get()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due.get()
    }

    pub fn owns(&self, fragment_id: &str) -> bool {
        self.fragments.iter().any(|f| f == fragment_id)
    }

    /// Next deadline, or `None` when the interval runs past what `Instant` can hold.
    fn deadline_from_now(&self) -> Option<Instant> {
        Instant::now().checked_add(self.interval)
    }

    /// Whether a running poller has reached its next refresh deadline.
    pub fn is_due(&self, now: Instant) -> bool {
        self.state().is_running() && self.next_due().is_some_and(|due| now >= due)
    }

    /// Number of completed refresh cycles for `fragment_id`.
    pub fn cycles(&self, fragment_id: &str) -> u64 {
        self.cycles.borrow().get(fragment_id).copied().unwrap_or(0)
    }

    /// Callbacks waiting for the next cycle of `fragment_id`.
    pub fn pending_callbacks(&self, fragment_id: &str) -> usize {
        self.pending.borrow().get(fragment_id).map_or(0, Vec::len)
    }

    /// Record a finished refresh of `fragment_id` and run its queued callbacks.
    ///
    /// Returns the number of callbacks that ran.
    pub fn complete_cycle(&self, fragment_id: &str) -> Result<usize, RefreshError> {
        if !self.owns(fragment_id) {
            return Err(RefreshError::UnknownFragment {
                fragment: fragment_id.to_string(),
            });
        }
        if !self.state().is_running() {
            return Err(RefreshError::NotRunning {
                fragment: fragment_id.to_string(),
            });
        }

        let cycle = {
            let mut cycles = self.cycles.borrow_mut();
            let count = cycles.entry(fragment_id.to_string()).or_insert(0);
            *count += 1;
            *count
        };
        self.next_due.set(self.deadline_from_now());

        // Callbacks may queue follow-ups on this poller, so the borrow ends first.
        let callbacks = self
            .pending
            .borrow_mut()
            .remove(fragment_id)
            .unwrap_or_default();
        let ran = callbacks.len();
        for callback in callbacks {
            callback();
        }

        debug!(
            event = "core.poller.cycle_completed",
            fragment_id = fragment_id,
            cycle = cycle,
            callbacks_run = ran
        );

        Ok(ran)
    }
}

impl Refresher for ContentPoller {
    fn stop_refresh(&self) -> Result<(), RefreshError> {
        self.state.set(PollState::Stopped);
        self.next_due.set(None);
        info!(
            event = "core.poller.stopped",
            fragment_id = self.fragment_id()
        );
        Ok(())
    }

    fn restart_refresh(&self) -> Result<(), RefreshError> {
        self.state.set(PollState::Running);
        self.next_due.set(self.deadline_from_now());
        info!(
            event = "core.poller.restarted",
            fragment_id = self.fragment_id(),
            interval_secs = self.interval.as_secs()
        );
        Ok(())
    }

    fn fragment_id(&self) -> Option<&str> {
        self.fragments.first().map(String::as_str)
    }
}

impl MainContentRefresher for ContentPoller {
    /// Fragments this poller does not own will never complete a cycle here,
    /// so their callbacks run immediately.
    fn after_refresh_of(&self, fragment_id: &str, callback: AfterRefresh) {
        if !self.owns(fragment_id) {
            debug!(
                event = "core.poller.after_refresh_unowned",
                fragment_id = fragment_id
            );
            callback();
            return;
        }

        self.pending
            .borrow_mut()
            .entry(fragment_id.to_string())
            .or_default()
            .push(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    const INTERVAL: Duration = Duration::from_secs(10);

    fn counter() -> (Rc<Cell<u32>>, impl Fn() -> AfterRefresh) {
        let count = Rc::new(Cell::new(0));
        let shared = Rc::clone(&count);
        let make = move || -> AfterRefresh {
            let c = Rc::clone(&shared);
            Box::new(move || c.set(c.get() + 1))
        };
        (count, make)
    }

    #[test]
    fn test_new_poller_is_running() {
        let poller = ContentPoller::new("pipelines", INTERVAL);
        assert_eq!(poller.state(), PollState::Running);
        assert!(poller.next_due().is_some());
        assert_eq!(poller.fragment_id(), Some("pipelines"));
        assert_eq!(poller.cycles("pipelines"), 0);
    }

    #[test]
    fn test_stop_and_restart() {
        let poller = ContentPoller::new("pipelines", INTERVAL);

        poller.stop_refresh().unwrap();
        assert_eq!(poller.state(), PollState::Stopped);
        assert_eq!(poller.next_due(), None);
        assert!(!poller.is_due(Instant::now() + INTERVAL * 2));

        poller.stop_refresh().unwrap();
        assert_eq!(poller.state(), PollState::Stopped);

        poller.restart_refresh().unwrap();
        assert_eq!(poller.state(), PollState::Running);
        assert!(poller.next_due().is_some());
    }

    #[test]
    fn test_huge_interval_has_no_deadline() {
        let poller = ContentPoller::new("body", Duration::MAX);
        assert_eq!(poller.next_due(), None);
        assert!(!poller.is_due(Instant::now()));

        poller.stop_refresh().unwrap();
        poller.restart_refresh().unwrap();
        assert_eq!(poller.state(), PollState::Running);
        assert_eq!(poller.next_due(), None);

        assert_eq!(poller.complete_cycle("body").unwrap(), 0);
        assert_eq!(poller.cycles("body"), 1);
    }

    #[test]
    fn test_is_due_after_interval() {
        let poller = ContentPoller::new("agents", INTERVAL);
        assert!(!poller.is_due(Instant::now()));
        assert!(poller.is_due(Instant::now() + INTERVAL * 2));
    }

    #[test]
    fn test_after_refresh_waits_for_cycle() {
        let poller = ContentPoller::with_fragments(["header", "body"], INTERVAL);
        let (count, make) = counter();

        poller.after_refresh_of("body", make());
        poller.after_refresh_of("body", make());
        assert_eq!(count.get(), 0);
        assert_eq!(poller.pending_callbacks("body"), 2);

        assert_eq!(poller.complete_cycle("header").unwrap(), 0);
        assert_eq!(count.get(), 0);

        assert_eq!(poller.complete_cycle("body").unwrap(), 2);
        assert_eq!(count.get(), 2);
        assert_eq!(poller.pending_callbacks("body"), 0);
        assert_eq!(poller.cycles("body"), 1);
    }

    #[test]
    fn test_callbacks_are_one_shot() {
        let poller = ContentPoller::new("body", INTERVAL);
        let (count, make) = counter();

        poller.after_refresh_of("body", make());
        poller.complete_cycle("body").unwrap();
        poller.complete_cycle("body").unwrap();

        assert_eq!(count.get(), 1);
        assert_eq!(poller.cycles("body"), 2);
    }

    #[test]
    fn test_after_refresh_of_unowned_fragment_runs_immediately() {
        let poller = ContentPoller::new("body", INTERVAL);
        let (count, make) = counter();

        poller.after_refresh_of("sidebar", make());

        assert_eq!(count.get(), 1);
        assert_eq!(poller.pending_callbacks("sidebar"), 0);
    }

    #[test]
    fn test_complete_cycle_rejects_unknown_fragment() {
        let poller = ContentPoller::new("body", INTERVAL);
        let err = poller.complete_cycle("sidebar").unwrap_err();
        assert!(matches!(err, RefreshError::UnknownFragment { fragment } if fragment == "sidebar"));
    }

    #[test]
    fn test_complete_cycle_rejects_stopped_poller() {
        let poller = ContentPoller::new("body", INTERVAL);
        let (count, make) = counter();
        poller.after_refresh_of("body", make());

        poller.stop_refresh().unwrap();
        let err = poller.complete_cycle("body").unwrap_err();
        assert!(matches!(err, RefreshError::NotRunning { .. }));
        assert_eq!(count.get(), 0);
        assert_eq!(poller.pending_callbacks("body"), 1);

        poller.restart_refresh().unwrap();
        assert_eq!(poller.complete_cycle("body").unwrap(), 1);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_callback_can_queue_follow_up() {
        let poller = Rc::new(ContentPoller::new("body", INTERVAL));
        let (count, make) = counter();

        let inner = Rc::clone(&poller);
        let follow_up = make();
        poller.after_refresh_of(
            "body",
            Box::new(move || inner.after_refresh_of("body", follow_up)),
        );

        poller.complete_cycle("body").unwrap();
        assert_eq!(count.get(), 0);
        assert_eq!(poller.pending_callbacks("body"), 1);

        poller.complete_cycle("body").unwrap();
        assert_eq!(count.get(), 1);
    }
}
