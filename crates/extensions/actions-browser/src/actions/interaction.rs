//! Element interaction actions: click, input, keys.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

use pagepilot_core::Action;
use pagepilot_protocols::{ActionContext, ActionError, ActionResult};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ClickElementParams {
    /// Highlight index of the element.
    pub index: u32,
    /// Overrides the element's xpath.
    pub xpath: Option<String>,
}

pub struct ClickElementAction;

#[async_trait]
impl Action for ClickElementAction {
    type Params = ClickElementParams;

    fn name(&self) -> &str {
        "click_element"
    }

    fn description(&self) -> &str {
        "Click element"
    }

    async fn run(&self, params: ClickElementParams, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionError> {
        let target = ctx.resolve_target(params.index, params.xpath.as_deref())?;
        ctx.browser.click(&target).await?;

        let text = ctx.element_index.element_text(params.index).unwrap_or_default();
        debug!("Clicked element {} ({})", params.index, target.xpath);
        Ok(ActionResult::success(format!(
            "Clicked button with index {}: {}",
            params.index, text
        )))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct InputTextParams {
    /// Highlight index of the element.
    pub index: u32,
    /// Text to type.
    pub text: String,
    /// Overrides the element's xpath.
    pub xpath: Option<String>,
}

pub struct InputTextAction;

#[async_trait]
impl Action for InputTextAction {
    type Params = InputTextParams;

    fn name(&self) -> &str {
        "input_text"
    }

    fn description(&self) -> &str {
        "Input text into a input interactive element"
    }

    async fn run(&self, params: InputTextParams, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionError> {
        let target = ctx.resolve_target(params.index, params.xpath.as_deref())?;
        ctx.browser.input_text(&target, &params.text).await?;
        Ok(ActionResult::success(format!(
            "Input \"{}\" into index {}",
            params.text, params.index
        )))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SendKeysParams {
    /// Keys such as "Escape", "Enter" or "Control+o".
    pub keys: String,
}

pub struct SendKeysAction;

#[async_trait]
impl Action for SendKeysAction {
    type Params = SendKeysParams;

    fn name(&self) -> &str {
        "send_keys"
    }

    fn description(&self) -> &str {
        "Send strings of special keys like Backspace, Insert, PageDown, Delete, Enter. \
         Shortcuts such as `Control+o` are also supported."
    }

    async fn run(&self, params: SendKeysParams, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionError> {
        ctx.browser.send_keys(&params.keys).await?;
        Ok(ActionResult::success(format!("Sent keys: {}", params.keys)))
    }
}
