use std::error::Error;

/// Base trait for all pagepulse errors
pub trait PulseError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the library
pub type PulseResult<T> = Result<T, Box<dyn PulseError>>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config file '{path}': {message}")]
    ConfigParseError { path: String, message: String },

    #[error("Invalid broadcast policy '{policy}'. Supported policies: isolate, abort")]
    InvalidPolicy { policy: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("IO error reading config: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl PulseError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidPolicy { .. } => "INVALID_POLICY",
            ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigParseError { .. }
                | ConfigError::InvalidPolicy { .. }
                | ConfigError::InvalidConfiguration { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_result() {
        let _result: PulseResult<i32> = Ok(42);
    }

    #[test]
    fn test_invalid_policy_display() {
        let error = ConfigError::InvalidPolicy {
            policy: "retry".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid broadcast policy 'retry'. Supported policies: isolate, abort"
        );
        assert_eq!(error.error_code(), "INVALID_POLICY");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_io_error_is_not_user_error() {
        let error = ConfigError::from(std::io::Error::other("disk gone"));
        assert_eq!(error.error_code(), "CONFIG_IO_ERROR");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_boxed_pulse_error() {
        let result: PulseResult<()> = Err(Box::new(ConfigError::InvalidConfiguration {
            message: "bad".to_string(),
        }));
        let err = result.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIGURATION");
        assert_eq!(err.to_string(), "Invalid configuration: bad");
    }
}
