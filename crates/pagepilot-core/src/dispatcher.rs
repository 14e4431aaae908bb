//! Action dispatcher.
//!
//! Every outcome of a dispatch, including unknown names, invalid parameters,
//! handler errors and handler panics, comes back as an [`ActionResult`].

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::Value;
use tracing::{debug, warn};

use pagepilot_protocols::{ActionContext, ActionError, ActionIntent, ActionResult};

use crate::registry::ActionRegistry;

/// Validates and runs actions from a shared registry.
#[derive(Debug, Clone)]
pub struct ActionDispatcher {
    registry: Arc<ActionRegistry>,
}

impl ActionDispatcher {
    pub fn new(registry: Arc<ActionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ActionRegistry> {
        &self.registry
    }

    /// Dispatch one action by name.
    pub async fn dispatch(
        &self,
        name: &str,
        raw_params: &Value,
        ctx: &ActionContext<'_>,
    ) -> ActionResult {
        match self.try_dispatch(name, raw_params, ctx).await {
            Ok(result) => {
                debug!(action = name, is_done = result.is_done, "Action completed");
                result
            }
            Err(e) => {
                warn!(action = name, error = %e, "Action failed");
                ActionResult::error(e.to_string())
            }
        }
    }

    /// Dispatch an intent chosen by the decision-maker.
    pub async fn dispatch_intent(&self, intent: &ActionIntent, ctx: &ActionContext<'_>) -> ActionResult {
        self.dispatch(&intent.name, &intent.params, ctx).await
    }

    async fn try_dispatch(
        &self,
        name: &str,
        raw_params: &Value,
        ctx: &ActionContext<'_>,
    ) -> Result<ActionResult, ActionError> {
        let spec = self
            .registry
            .get(name)
            .ok_or_else(|| ActionError::NotFound(name.to_string()))?;

        let params = spec.schema().coerce(raw_params)?;
        debug!(action = name, params = %params, "Dispatching action");

        AssertUnwindSafe(spec.handler().handle(params, ctx))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(ActionError::Panicked(panic_message(payload.as_ref()))))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
