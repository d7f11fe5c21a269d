//! # Configuration System
//!
//! Hierarchical TOML configuration: defaults, then `~/.pagepulse/config.toml`,
//! then `./.pagepulse/config.toml`, then CLI flags.
//!
//! ```rust,no_run
//! use pagepulse_core::config::PulseConfig;
//!
//! fn example() -> Result<(), pagepulse_core::errors::ConfigError> {
//!     let config = PulseConfig::load_hierarchy()?;
//!     let interval = config.interval();
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

use std::time::Duration;

pub use types::{PulseConfig, RefreshConfig};

use crate::errors::ConfigError;
use crate::refresh::BroadcastPolicy;

impl PulseConfig {
    /// Load configuration from the user and project config files.
    pub fn load_hierarchy() -> Result<Self, ConfigError> {
        loading::load_hierarchy()
    }

    /// Effective polling interval.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(
            self.refresh
                .interval_secs
                .unwrap_or_else(defaults::default_interval_secs),
        )
    }

    /// Effective broadcast failure policy.
    pub fn broadcast_policy(&self) -> BroadcastPolicy {
        self.refresh
            .broadcast_policy
            .unwrap_or_else(defaults::default_broadcast_policy)
    }
}
