//! Page-level refresher registry.
//!
//! Page components register the polling fragments they own, one of which
//! may be the main-content refresher. Broadcasts stop or restart all of them
//! at once, typically while a blocking dialog is open.

pub mod errors;
pub mod noop;
pub mod registry;
pub mod traits;
pub mod types;

pub use errors::RefreshError;
pub use noop::NoopMainRefresher;
pub use registry::RefreshRegistry;
pub use traits::{MainContentRefresher, Refresher};
pub use types::{AfterRefresh, BroadcastFailure, BroadcastKind, BroadcastPolicy, BroadcastReport};
