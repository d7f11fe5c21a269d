use crate::config::types::PulseConfig;
use crate::errors::ConfigError;
use crate::poller::MAX_POLL_INTERVAL_SECS;

/// Validate a merged configuration.
pub fn validate_config(config: &PulseConfig) -> Result<(), ConfigError> {
    match config.refresh.interval_secs {
        Some(0) => {
            return Err(ConfigError::InvalidConfiguration {
                message: "refresh.interval_secs must be at least 1".to_string(),
            });
        }
        Some(secs) if secs > MAX_POLL_INTERVAL_SECS => {
            return Err(ConfigError::InvalidConfiguration {
                message: format!(
                    "refresh.interval_secs must be at most {} (got {})",
                    MAX_POLL_INTERVAL_SECS, secs
                ),
            });
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::RefreshConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&PulseConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let config = PulseConfig {
            refresh: RefreshConfig {
                interval_secs: Some(0),
                broadcast_policy: None,
            },
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_interval_above_one_day_is_rejected() {
        let config: PulseConfig =
            toml::from_str("[refresh]\ninterval_secs = 9223372036854775807\n").unwrap();
        let err = validate_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: refresh.interval_secs must be at most 86400 (got 9223372036854775807)"
        );
    }

    #[test]
    fn test_interval_at_one_day_is_accepted() {
        let config = PulseConfig {
            refresh: RefreshConfig {
                interval_secs: Some(MAX_POLL_INTERVAL_SECS),
                broadcast_policy: None,
            },
        };
        assert!(validate_config(&config).is_ok());
    }
}
