use tracing::{info, warn};
use uuid::Uuid;

use crate::refresh::{BroadcastPolicy, BroadcastReport, RefreshRegistry};
use crate::shell::errors::ShellError;

/// Top-level page context that owns the refresh registry.
///
/// Sub-components borrow the registry through the shell instead of reaching
/// for global state. Leaving a page clears whatever the outgoing page
/// registered, so the next page starts from an empty registry.
pub struct PageShell {
    registry: RefreshRegistry,
    page: Option<String>,
    page_session_id: Option<String>,
    modal_depth: usize,
}

impl Default for PageShell {
    fn default() -> Self {
        Self::new(BroadcastPolicy::default())
    }
}

impl PageShell {
    pub fn new(policy: BroadcastPolicy) -> Self {
        Self {
            registry: RefreshRegistry::new(policy),
            page: None,
            page_session_id: None,
            modal_depth: 0,
        }
    }

    pub fn registry(&self) -> &RefreshRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RefreshRegistry {
        &mut self.registry
    }

    pub fn current_page(&self) -> Option<&str> {
        self.page.as_deref()
    }

    /// Identifier of the current page visit, regenerated on every navigation.
    pub fn page_session_id(&self) -> Option<&str> {
        self.page_session_id.as_deref()
    }

    pub fn modal_depth(&self) -> usize {
        self.modal_depth
    }

    /// Navigate to `name`, tearing down the outgoing page first.
    pub fn enter_page(&mut self, name: impl Into<String>) {
        self.leave();

        let name = name.into();
        let session_id = Uuid::new_v4().to_string();
        info!(
            event = "core.shell.page_entered",
            page = name.as_str(),
            page_session_id = session_id.as_str()
        );
        self.page = Some(name);
        self.page_session_id = Some(session_id);
    }

    /// Tear down the current page: clear its refreshers and any modal state.
    pub fn leave(&mut self) {
        if let Some(page) = self.page.take() {
            info!(
                event = "core.shell.page_left",
                page = page.as_str(),
                refreshers = self.registry.len()
            );
        }
        if self.modal_depth > 0 {
            warn!(
                event = "core.shell.page_left_with_open_modal",
                modal_depth = self.modal_depth
            );
        }
        if !self.registry.is_empty() {
            self.registry.clear();
        }
        self.page_session_id = None;
        self.modal_depth = 0;
    }

    /// Open a blocking modal. The first open pauses every refresher.
    ///
    /// The modal counts as open even when the pause broadcast fails.
    pub fn open_modal(&mut self) -> Result<Option<BroadcastReport>, ShellError> {
        self.modal_depth += 1;
        info!(event = "core.shell.modal_opened", modal_depth = self.modal_depth);

        if self.modal_depth > 1 {
            return Ok(None);
        }
        Ok(Some(self.registry.disable_ajax()?))
    }

    /// Close a blocking modal. The last close resumes every refresher.
    pub fn close_modal(&mut self) -> Result<Option<BroadcastReport>, ShellError> {
        if self.modal_depth == 0 {
            return Err(ShellError::NoOpenModal);
        }
        self.modal_depth -= 1;
        info!(event = "core.shell.modal_closed", modal_depth = self.modal_depth);

        if self.modal_depth > 0 {
            return Ok(None);
        }
        Ok(Some(self.registry.enable_ajax()?))
    }
}
