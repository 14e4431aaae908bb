//! Decision-maker errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("Decision request failed: {0}")]
    Transport(String),

    #[error("Malformed decision output: {0}")]
    MalformedOutput(String),

    #[error("Decision contained no actions")]
    EmptyDecision,

    #[error("Decision request timed out after {0} seconds")]
    Timeout(u64),
}
