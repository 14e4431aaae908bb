use super::*;
use async_trait::async_trait;
use pagepilot_dom::{DomTree, ElementIndex, ElementTarget};
use pagepilot_protocols::{AbortSignal, BrowserDriver, BrowserError, PageSnapshot};
use parking_lot::Mutex;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::action::{Action, NoParams};
use crate::registry::ActionRegistryBuilder;

#[derive(Default)]
struct RecordingDriver {
    clicks: Mutex<Vec<String>>,
}

#[async_trait]
impl BrowserDriver for RecordingDriver {
    async fn snapshot(&self) -> Result<PageSnapshot, BrowserError> {
        Ok(PageSnapshot::default())
    }

    async fn navigate(&self, _url: &str) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn click(&self, target: &ElementTarget) -> Result<(), BrowserError> {
        self.clicks.lock().push(target.xpath.clone());
        Ok(())
    }

    async fn input_text(&self, _target: &ElementTarget, _text: &str) -> Result<(), BrowserError> {
        Err(BrowserError::Disconnected("target closed".to_string()))
    }
}

#[derive(Deserialize, JsonSchema)]
struct IndexParams {
    index: u32,
}

struct Click;

#[async_trait]
impl Action for Click {
    type Params = IndexParams;

    fn name(&self) -> &str {
        "click_element"
    }

    fn description(&self) -> &str {
        "Click element"
    }

    async fn run(&self, params: IndexParams, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionError> {
        let target = ctx.target(params.index)?;
        ctx.browser.click(&target).await?;
        Ok(ActionResult::success(format!("Clicked index {}", params.index)))
    }
}

struct Type;

#[async_trait]
impl Action for Type {
    type Params = IndexParams;

    fn name(&self) -> &str {
        "input_text"
    }

    fn description(&self) -> &str {
        "Input text"
    }

    async fn run(&self, params: IndexParams, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionError> {
        let target = ctx.target(params.index)?;
        ctx.browser.input_text(&target, "x").await?;
        Ok(ActionResult::success("typed"))
    }
}

struct Explode;

#[async_trait]
impl Action for Explode {
    type Params = NoParams;

    fn name(&self) -> &str {
        "explode"
    }

    fn description(&self) -> &str {
        "Panics"
    }

    async fn run(&self, _params: NoParams, _ctx: &ActionContext<'_>) -> Result<ActionResult, ActionError> {
        panic!("handler blew up");
    }
}

struct Done;

#[async_trait]
impl Action for Done {
    type Params = NoParams;

    fn name(&self) -> &str {
        "done"
    }

    fn description(&self) -> &str {
        "Finish"
    }

    async fn run(&self, _params: NoParams, _ctx: &ActionContext<'_>) -> Result<ActionResult, ActionError> {
        Ok(ActionResult::done("finished"))
    }
}

fn dispatcher() -> ActionDispatcher {
    let mut builder = ActionRegistryBuilder::new();
    builder
        .register_action(Click)
        .unwrap()
        .register_action(Type)
        .unwrap()
        .register_action(Explode)
        .unwrap()
        .register_action(Done)
        .unwrap();
    ActionDispatcher::new(Arc::new(builder.build()))
}

fn page() -> DomTree {
    DomTree::parse(&json!({
        "tagName": "body",
        "children": [
            {"tagName": "button", "xpath": "/html/body/button", "highlightIndex": 10}
        ]
    }))
    .unwrap()
}

#[tokio::test]
async fn test_unknown_action_is_error_result() {
    let dispatcher = dispatcher();
    let index = ElementIndex::empty();
    let driver = RecordingDriver::default();
    let signal = AbortSignal::new();
    let ctx = ActionContext::new(&index, &driver, &signal);

    let result = dispatcher.dispatch("does_not_exist", &json!({}), &ctx).await;
    let error = result.error.unwrap();
    assert!(!error.is_empty());
    assert!(error.contains("does_not_exist"));
    assert!(!result.is_done);
    assert!(result.include_in_memory);
}

#[tokio::test]
async fn test_coerced_params_reach_handler() {
    let dispatcher = dispatcher();
    let tree = page();
    let index = tree.element_index().unwrap();
    let driver = RecordingDriver::default();
    let signal = AbortSignal::new();
    let ctx = ActionContext::new(&index, &driver, &signal);

    let result = dispatcher
        .dispatch("click_element", &json!({"index": "10"}), &ctx)
        .await;
    assert!(!result.is_error());
    assert_eq!(result.extracted_content.as_deref(), Some("Clicked index 10"));
    assert_eq!(*driver.clicks.lock(), vec!["/html/body/button".to_string()]);
}

#[tokio::test]
async fn test_validation_error_is_result() {
    let dispatcher = dispatcher();
    let index = ElementIndex::empty();
    let driver = RecordingDriver::default();
    let signal = AbortSignal::new();
    let ctx = ActionContext::new(&index, &driver, &signal);

    let result = dispatcher
        .dispatch("click_element", &json!({"index": "first"}), &ctx)
        .await;
    assert!(result.error.unwrap().contains("Invalid parameters"));
    assert!(driver.clicks.lock().is_empty());

    let result = dispatcher.dispatch("click_element", &json!({}), &ctx).await;
    assert!(result.error.unwrap().contains("missing field `index`"));
}

#[tokio::test]
async fn test_missing_element_message() {
    let dispatcher = dispatcher();
    let tree = page();
    let index = tree.element_index().unwrap();
    let driver = RecordingDriver::default();
    let signal = AbortSignal::new();
    let ctx = ActionContext::new(&index, &driver, &signal);

    let result = dispatcher.dispatch("click_element", &json!({"index": 3}), &ctx).await;
    assert_eq!(
        result.error.as_deref(),
        Some("Element with index 3 does not exist - retry or use alternative actions")
    );
}

#[tokio::test]
async fn test_handler_error_is_result() {
    let dispatcher = dispatcher();
    let tree = page();
    let index = tree.element_index().unwrap();
    let driver = RecordingDriver::default();
    let signal = AbortSignal::new();
    let ctx = ActionContext::new(&index, &driver, &signal);

    let result = dispatcher.dispatch("input_text", &json!({"index": 10}), &ctx).await;
    let error = result.error.unwrap();
    assert!(error.contains("Browser error"));
    assert!(error.contains("target closed"));
    assert!(!result.is_done);
}

#[tokio::test]
async fn test_handler_panic_is_result() {
    let dispatcher = dispatcher();
    let index = ElementIndex::empty();
    let driver = RecordingDriver::default();
    let signal = AbortSignal::new();
    let ctx = ActionContext::new(&index, &driver, &signal);

    let result = dispatcher.dispatch("explode", &Value::Null, &ctx).await;
    let error = result.error.unwrap();
    assert!(error.contains("panicked"));
    assert!(error.contains("handler blew up"));
}

#[tokio::test]
async fn test_dispatch_intent_done() {
    let dispatcher = dispatcher();
    let index = ElementIndex::empty();
    let driver = RecordingDriver::default();
    let signal = AbortSignal::new();
    let ctx = ActionContext::new(&index, &driver, &signal);

    let intent = ActionIntent::new("done", json!("ignored"));
    let result = dispatcher.dispatch_intent(&intent, &ctx).await;
    assert!(result.is_done);
    assert!(!result.is_error());
}

#[test]
fn test_panic_message() {
    assert_eq!(panic_message(&"static"), "static");
    assert_eq!(panic_message(&"owned".to_string()), "owned");
    assert_eq!(panic_message(&42_u8), "unknown panic");
}
