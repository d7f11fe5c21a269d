//! Configuration loading and merging logic.
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults**
//! 2. **User config** - `~/.pagepulse/config.toml`
//! 3. **Project config** - `./.pagepulse/config.toml`
//! 4. **CLI arguments** - applied by the caller

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::{PulseConfig, RefreshConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

const CONFIG_DIR: &str = ".pagepulse";
const CONFIG_FILE: &str = "config.toml";

/// Load and merge the user and project config files.
///
/// # Errors
///
/// Returns an error if a file exists but cannot be parsed, or if validation
/// fails. Missing config files are not errors.
pub fn load_hierarchy() -> Result<PulseConfig, ConfigError> {
    let user_path = user_config_path();
    let project_path = std::env::current_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
    load_hierarchy_from(user_path.as_deref(), Some(&project_path))
}

/// Load and merge config from explicit paths; `None` or missing files are skipped.
pub fn load_hierarchy_from(
    user_path: Option<&Path>,
    project_path: Option<&Path>,
) -> Result<PulseConfig, ConfigError> {
    let mut config = PulseConfig::default();

    for path in [user_path, project_path].into_iter().flatten() {
        if let Some(loaded) = load_optional(path)? {
            config = merge_configs(config, loaded);
        }
    }

    validate_config(&config)?;
    Ok(config)
}

/// Load a config file, treating "file not found" as absent.
fn load_optional(path: &Path) -> Result<Option<PulseConfig>, ConfigError> {
    match load_config_file(path) {
        Ok(config) => {
            debug!(event = "core.config.file_loaded", path = %path.display());
            Ok(Some(config))
        }
        Err(ConfigError::IoError { source }) if source.kind() == std::io::ErrorKind::NotFound => {
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Load a configuration file from the given path.
pub fn load_config_file(path: &Path) -> Result<PulseConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Path of the user config file, if a home directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Merge two configurations, with `override_config` taking precedence.
pub fn merge_configs(base: PulseConfig, override_config: PulseConfig) -> PulseConfig {
    PulseConfig {
        refresh: RefreshConfig {
            interval_secs: override_config
                .refresh
                .interval_secs
                .or(base.refresh.interval_secs),
            broadcast_policy: override_config
                .refresh
                .broadcast_policy
                .or(base.refresh.broadcast_policy),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh::BroadcastPolicy;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_files_yield_defaults() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");

        let config = load_hierarchy_from(Some(&missing), None).unwrap();

        assert_eq!(config, PulseConfig::default());
    }

    #[test]
    fn test_project_overrides_user() {
        let dir = TempDir::new().unwrap();
        let user = write_config(
            &dir,
            "user.toml",
            "[refresh]\ninterval_secs = 30\nbroadcast_policy = \"abort\"\n",
        );
        let project = write_config(&dir, "project.toml", "[refresh]\ninterval_secs = 5\n");

        let config = load_hierarchy_from(Some(&user), Some(&project)).unwrap();

        assert_eq!(config.refresh.interval_secs, Some(5));
        assert_eq!(config.refresh.broadcast_policy, Some(BroadcastPolicy::Abort));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let dir = TempDir::new().unwrap();
        let bad = write_config(&dir, "bad.toml", "[refresh]\ninterval_secs = \"soon\"\n");

        let err = load_hierarchy_from(Some(&bad), None).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let bad = write_config(&dir, "bad.toml", "[refresh]\nbroadcast_policy = \"retry\"\n");

        let err = load_hierarchy_from(None, Some(&bad)).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_validation_runs_after_merge() {
        let dir = TempDir::new().unwrap();
        let zero = write_config(&dir, "zero.toml", "[refresh]\ninterval_secs = 0\n");

        let err = load_hierarchy_from(Some(&zero), None).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_empty_file_is_default() {
        let dir = TempDir::new().unwrap();
        let empty = write_config(&dir, "empty.toml", "");

        let config = load_hierarchy_from(Some(&empty), None).unwrap();

        assert_eq!(config, PulseConfig::default());
    }

    #[test]
    fn test_merge_keeps_base_when_override_unset() {
        let base = PulseConfig {
            refresh: RefreshConfig {
                interval_secs: Some(20),
                broadcast_policy: Some(BroadcastPolicy::Abort),
            },
        };
        let merged = merge_configs(base.clone(), PulseConfig::default());
        assert_eq!(merged, base);
    }
}
