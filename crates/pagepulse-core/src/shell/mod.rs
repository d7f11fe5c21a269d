//! Page-shell context owning the refresh registry for one page visit.

pub mod errors;
pub mod page;

pub use errors::ShellError;
pub use page::PageShell;
