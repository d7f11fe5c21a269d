//! Call tracing for simulated refreshers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use pagepulse_core::{AfterRefresh, ContentPoller, MainContentRefresher, RefreshError, Refresher};

/// One refresher call, step outcome or callback observed during a simulation.
#[derive(Debug, Clone, Serialize)]
pub struct TraceEntry {
    /// 1-based index of the step that caused this entry.
    pub step: usize,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub detail: String,
    pub at: DateTime<Utc>,
}

/// Shared, append-only trace of a simulation.
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    entries: Rc<RefCell<Vec<TraceEntry>>>,
    step: Rc<Cell<usize>>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_step(&self, step: usize) {
        self.step.set(step);
    }

    pub fn record(&self, action: &str, target: Option<&str>, detail: impl Into<String>) {
        self.entries.borrow_mut().push(TraceEntry {
            step: self.step.get(),
            action: action.to_string(),
            target: target.map(str::to_string),
            detail: detail.into(),
            at: Utc::now(),
        });
    }

    pub fn entries(&self) -> Vec<TraceEntry> {
        self.entries.borrow().clone()
    }
}

/// A content poller that records every call made to it.
pub struct TracedPoller {
    name: String,
    poller: ContentPoller,
    log: TraceLog,
}

impl TracedPoller {
    pub fn new(name: &str, interval: Duration, log: &TraceLog) -> Self {
        Self {
            name: name.to_string(),
            poller: ContentPoller::new(name, interval),
            log: log.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn complete_cycle(&self) -> Result<usize, RefreshError> {
        let ran = self.poller.complete_cycle(&self.name)?;
        self.log.record(
            "cycle",
            Some(self.name.as_str()),
            format!(
                "cycle {} done, {} callback(s) ran",
                self.poller.cycles(&self.name),
                ran
            ),
        );
        Ok(ran)
    }
}

impl Refresher for TracedPoller {
    fn stop_refresh(&self) -> Result<(), RefreshError> {
        self.poller.stop_refresh()?;
        self.log.record("stop", Some(self.name.as_str()), "stopped");
        Ok(())
    }

    fn restart_refresh(&self) -> Result<(), RefreshError> {
        self.poller.restart_refresh()?;
        self.log.record(
            "restart",
            Some(self.name.as_str()),
            format!("polling every {}s", self.poller.interval().as_secs()),
        );
        Ok(())
    }

    fn fragment_id(&self) -> Option<&str> {
        Some(self.name.as_str())
    }
}

impl MainContentRefresher for TracedPoller {
    fn after_refresh_of(&self, fragment_id: &str, callback: AfterRefresh) {
        self.log.record(
            "queue",
            Some(fragment_id),
            format!("callback queued on {}", self.name),
        );
        self.poller.after_refresh_of(fragment_id, callback);
    }
}

/// A refresher whose stop and restart always fail.
pub struct FaultyRefresher {
    name: String,
    log: TraceLog,
}

impl FaultyRefresher {
    pub fn new(name: &str, log: &TraceLog) -> Self {
        Self {
            name: name.to_string(),
            log: log.clone(),
        }
    }
}

impl Refresher for FaultyRefresher {
    fn stop_refresh(&self) -> Result<(), RefreshError> {
        self.log.record("stop", Some(self.name.as_str()), "failed");
        Err(RefreshError::StopFailed {
            fragment: self.name.clone(),
            message: "refresher is faulty".to_string(),
        })
    }

    fn restart_refresh(&self) -> Result<(), RefreshError> {
        self.log.record("restart", Some(self.name.as_str()), "failed");
        Err(RefreshError::RestartFailed {
            fragment: self.name.clone(),
            message: "refresher is faulty".to_string(),
        })
    }

    fn fragment_id(&self) -> Option<&str> {
        Some(self.name.as_str())
    }
}
