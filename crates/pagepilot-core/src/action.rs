//! Action handler traits.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::{DeserializeOwned, Deserializer, IgnoredAny};
use serde::Deserialize;
use serde_json::Value;

use pagepilot_protocols::{ActionContext, ActionError, ActionResult};

/// A typed browser action.
///
/// Parameters are coerced against the schema of `Params` and deserialized
/// before `run` is called, so handlers only ever see well-formed input.
#[async_trait]
pub trait Action: Send + Sync + 'static {
    type Params: DeserializeOwned + JsonSchema + Send;

    /// Unique action name as the decision-maker spells it.
    fn name(&self) -> &str;

    /// Description shown to the decision-maker.
    fn description(&self) -> &str;

    async fn run(
        &self,
        params: Self::Params,
        ctx: &ActionContext<'_>,
    ) -> Result<ActionResult, ActionError>;
}

/// Type-erased handler stored in the registry.
///
/// Receives parameters already coerced to the action's schema.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    async fn handle(
        &self,
        params: Value,
        ctx: &ActionContext<'_>,
    ) -> Result<ActionResult, ActionError>;
}

/// Adapts an [`Action`] to [`ActionHandler`] by deserializing its parameters.
pub struct TypedHandler<A> {
    action: A,
}

impl<A: Action> TypedHandler<A> {
    pub fn new(action: A) -> Self {
        Self { action }
    }
}

#[async_trait]
impl<A: Action> ActionHandler for TypedHandler<A> {
    async fn handle(
        &self,
        params: Value,
        ctx: &ActionContext<'_>,
    ) -> Result<ActionResult, ActionError> {
        let params: A::Params = serde_json::from_value(params)
            .map_err(|e| ActionError::InvalidParameters(e.to_string()))?;
        self.action.run(params, ctx).await
    }
}

/// Parameters of actions that take none. Deserializes from anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, JsonSchema)]
pub struct NoParams {}

impl<'de> Deserialize<'de> for NoParams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer)?;
        Ok(Self {})
    }
}
