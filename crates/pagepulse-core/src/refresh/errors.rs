//! Refresh-specific error types.

use crate::errors::PulseError;
use crate::refresh::types::BroadcastKind;

/// Errors that can occur while stopping, restarting or cycling refreshers.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("Failed to stop refresh of '{fragment}': {message}")]
    StopFailed { fragment: String, message: String },

    #[error("Failed to restart refresh of '{fragment}': {message}")]
    RestartFailed { fragment: String, message: String },

    #[error("Refresher for '{fragment}' is stopped")]
    NotRunning { fragment: String },

    #[error("Fragment '{fragment}' is not owned by this refresher")]
    UnknownFragment { fragment: String },

    #[error("{kind} broadcast aborted at refresher #{index}: {source}")]
    BroadcastAborted {
        kind: BroadcastKind,
        index: usize,
        #[source]
        source: Box<RefreshError>,
    },
}

impl PulseError for RefreshError {
    fn error_code(&self) -> &'static str {
        match self {
            RefreshError::StopFailed { .. } => "REFRESH_STOP_FAILED",
            RefreshError::RestartFailed { .. } => "REFRESH_RESTART_FAILED",
            RefreshError::NotRunning { .. } => "REFRESH_NOT_RUNNING",
            RefreshError::UnknownFragment { .. } => "REFRESH_UNKNOWN_FRAGMENT",
            RefreshError::BroadcastAborted { .. } => "REFRESH_BROADCAST_ABORTED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, RefreshError::UnknownFragment { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_failed_display() {
        let error = RefreshError::StopFailed {
            fragment: "build-history".to_string(),
            message: "timer already torn down".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to stop refresh of 'build-history': timer already torn down"
        );
        assert_eq!(error.error_code(), "REFRESH_STOP_FAILED");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_broadcast_aborted_keeps_source() {
        let error = RefreshError::BroadcastAborted {
            kind: BroadcastKind::Restart,
            index: 2,
            source: Box::new(RefreshError::RestartFailed {
                fragment: "agents".to_string(),
                message: "boom".to_string(),
            }),
        };
        assert_eq!(
            error.to_string(),
            "restart broadcast aborted at refresher #2: Failed to restart refresh of 'agents': boom"
        );
        assert_eq!(error.error_code(), "REFRESH_BROADCAST_ABORTED");
        let source = std::error::Error::source(&error).unwrap();
        assert_eq!(source.to_string(), "Failed to restart refresh of 'agents': boom");
    }

    #[test]
    fn test_unknown_fragment_is_user_error() {
        let error = RefreshError::UnknownFragment {
            fragment: "nope".to_string(),
        };
        assert_eq!(error.error_code(), "REFRESH_UNKNOWN_FRAGMENT");
        assert!(error.is_user_error());
    }
}
