//! DecisionMaker trait definition.

use async_trait::async_trait;

use super::{Decision, DecisionRequest};
use crate::error::DecisionError;

/// Core trait for decision-makers.
#[async_trait]
pub trait DecisionMaker: Send + Sync {
    /// Choose the next actions for the given page state.
    async fn decide(&self, request: DecisionRequest) -> Result<Decision, DecisionError>;
}
