//! Configuration type definitions.
//!
//! # Example Configuration
//!
//! ```toml
//! [refresh]
//! interval_secs = 10
//! broadcast_policy = "isolate"
//! ```

use serde::{Deserialize, Serialize};

use crate::refresh::BroadcastPolicy;

/// Configuration loaded from TOML config files.
///
/// Loaded from `~/.pagepulse/config.toml` then `./.pagepulse/config.toml`;
/// project values override user values.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PulseConfig {
    #[serde(default)]
    pub refresh: RefreshConfig,
}

/// Polling and broadcast settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RefreshConfig {
    /// Seconds between refresh cycles of a fragment.
    /// Default: 10 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_secs: Option<u64>,

    /// What a broadcast does when one refresher fails.
    /// Default: isolate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadcast_policy: Option<BroadcastPolicy>,
}
