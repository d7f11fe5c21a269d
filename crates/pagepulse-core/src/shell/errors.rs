use crate::errors::PulseError;
use crate::refresh::RefreshError;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("No modal is open")]
    NoOpenModal,

    #[error(transparent)]
    Refresh(#[from] RefreshError),
}

impl PulseError for ShellError {
    fn error_code(&self) -> &'static str {
        match self {
            ShellError::NoOpenModal => "SHELL_NO_OPEN_MODAL",
            ShellError::Refresh(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            ShellError::NoOpenModal => true,
            ShellError::Refresh(e) => e.is_user_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_error_from_refresh_error() {
        let err = ShellError::from(RefreshError::NotRunning {
            fragment: "body".to_string(),
        });
        assert_eq!(err.error_code(), "REFRESH_NOT_RUNNING");
        assert_eq!(err.to_string(), "Refresher for 'body' is stopped");
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_no_open_modal() {
        let err = ShellError::NoOpenModal;
        assert_eq!(err.error_code(), "SHELL_NO_OPEN_MODAL");
        assert!(err.is_user_error());
    }
}
