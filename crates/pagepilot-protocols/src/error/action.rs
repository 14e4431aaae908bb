//! Action execution errors.

use thiserror::Error;

use super::BrowserError;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Action not found: {0}")]
    NotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Element with index {0} does not exist - retry or use alternative actions")]
    ElementNotFound(u32),

    #[error("Action execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("Action was cancelled")]
    Cancelled,

    #[error("Action handler panicked: {0}")]
    Panicked(String),
}

impl ActionError {
    /// Whether the error stems from the parameters rather than from running
    /// the handler.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidParameters(_))
    }
}
