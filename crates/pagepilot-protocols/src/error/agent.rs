//! Terminal step-loop errors.

use thiserror::Error;

/// Ways a run ends other than successful completion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("Aborted after {failures} consecutive failed steps (max {max})")]
    TooManyFailures { failures: u32, max: u32 },

    #[error("Agent run was cancelled")]
    Cancelled,

    #[error("Reached the limit of {0} steps before the task was done")]
    MaxStepsExceeded(u32),
}
