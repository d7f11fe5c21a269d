use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::refresh::errors::RefreshError;

/// One-shot callback run after a fragment finishes a refresh cycle.
pub type AfterRefresh = Box<dyn FnOnce()>;

/// Which method a broadcast invokes on every registered refresher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastKind {
    /// `stop_refresh`, issued by `disable_ajax`.
    Stop,
    /// `restart_refresh`, issued by `enable_ajax`.
    Restart,
}

impl BroadcastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BroadcastKind::Stop => "stop",
            BroadcastKind::Restart => "restart",
        }
    }
}

impl fmt::Display for BroadcastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a broadcast does when one refresher fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastPolicy {
    /// Record the failure and keep going with the remaining refreshers.
    #[default]
    Isolate,
    /// Stop at the first failure; later refreshers are not invoked.
    Abort,
}

impl BroadcastPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BroadcastPolicy::Isolate => "isolate",
            BroadcastPolicy::Abort => "abort",
        }
    }
}

impl fmt::Display for BroadcastPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BroadcastPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "isolate" => Ok(BroadcastPolicy::Isolate),
            "abort" => Ok(BroadcastPolicy::Abort),
            _ => Err(ConfigError::InvalidPolicy {
                policy: s.to_string(),
            }),
        }
    }
}

/// A refresher that failed during an isolated broadcast.
#[derive(Debug)]
pub struct BroadcastFailure {
    /// Position of the refresher in registration order.
    pub index: usize,
    pub fragment_id: Option<String>,
    pub error: RefreshError,
}

/// Outcome of a `disable_ajax` / `enable_ajax` call.
#[derive(Debug)]
pub struct BroadcastReport {
    pub kind: BroadcastKind,
    /// Number of refreshers the broadcast called, failed ones included.
    pub invoked: usize,
    pub failures: Vec<BroadcastFailure>,
}

impl BroadcastReport {
    pub fn new(kind: BroadcastKind) -> Self {
        Self {
            kind,
            invoked: 0,
            failures: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.invoked - self.failures.len()
    }
}
