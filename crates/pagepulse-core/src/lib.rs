//! pagepulse-core: page-level polling fragment registry
//!
//! Page components register the refreshers that poll their fragments into a
//! [`RefreshRegistry`], owned by a [`PageShell`]. Blocking dialogs pause and
//! resume every refresher at once; the main-content refresher sequences
//! one-shot actions after a fragment's next refresh.
//!
//! # Main Entry Points
//!
//! - [`refresh`] - Registry, refresher traits, broadcast reports
//! - [`poller`] - Interval-driven content poller
//! - [`shell`] - Page context owning the registry
//! - [`config`] - Configuration management

pub mod config;
pub mod errors;
pub mod events;
pub mod logging;
pub mod poller;
pub mod refresh;
pub mod shell;

pub use config::PulseConfig;
pub use errors::{ConfigError, PulseError, PulseResult};
pub use poller::{ContentPoller, PollState};
pub use refresh::{
    AfterRefresh, BroadcastFailure, BroadcastKind, BroadcastPolicy, BroadcastReport,
    MainContentRefresher, NoopMainRefresher, RefreshError, RefreshRegistry, Refresher,
};
pub use shell::{PageShell, ShellError};

pub use logging::init_logging;
