//! Action execution context.

use std::sync::atomic::{AtomicBool, Ordering};

use pagepilot_dom::{ElementIndex, ElementNode, ElementTarget};

use crate::browser::BrowserDriver;
use crate::error::ActionError;

/// What a handler may use while it runs.
///
/// Handlers address elements through the element index of the current
/// snapshot only; the tree itself is not exposed.
#[derive(Clone, Copy)]
pub struct ActionContext<'a> {
    /// Highlight-index lookup for the current snapshot.
    pub element_index: &'a ElementIndex<'a>,

    /// Driver for the page owned by the running loop.
    pub browser: &'a dyn BrowserDriver,

    /// Cancellation flag of the running loop.
    pub abort_signal: &'a AbortSignal,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        element_index: &'a ElementIndex<'a>,
        browser: &'a dyn BrowserDriver,
        abort_signal: &'a AbortSignal,
    ) -> Self {
        Self {
            element_index,
            browser,
            abort_signal,
        }
    }

    /// Look up an element by highlight index.
    pub fn element(&self, index: u32) -> Result<&'a ElementNode, ActionError> {
        self.element_index
            .get(index)
            .ok_or(ActionError::ElementNotFound(index))
    }

    /// Detached target for the browser driver.
    pub fn target(&self, index: u32) -> Result<ElementTarget, ActionError> {
        self.element_index
            .target(index)
            .ok_or(ActionError::ElementNotFound(index))
    }

    /// Target for an element, with the xpath replaced when the
    /// decision-maker supplied a non-empty one.
    pub fn resolve_target(&self, index: u32, xpath: Option<&str>) -> Result<ElementTarget, ActionError> {
        let target = self.target(index)?;
        Ok(match xpath.map(str::trim).filter(|x| !x.is_empty()) {
            Some(xpath) => target.with_xpath(xpath),
            None => target,
        })
    }

    /// Check if the operation should be aborted.
    pub fn is_aborted(&self) -> bool {
        self.abort_signal.is_aborted()
    }
}

/// Signal for aborting a run.
#[derive(Debug)]
pub struct AbortSignal {
    id: uuid::Uuid,
    aborted: AtomicBool,
}

impl AbortSignal {
    /// Create a new abort signal.
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            aborted: AtomicBool::new(false),
        }
    }

    /// Identifier used to correlate log lines of one run.
    pub fn id(&self) -> uuid::Uuid {
        self.id
    }

    /// Check if aborted.
    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Relaxed)
    }

    /// Trigger the abort.
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Relaxed);
    }
}

impl Default for AbortSignal {
    fn default() -> Self {
        Self::new()
    }
}
