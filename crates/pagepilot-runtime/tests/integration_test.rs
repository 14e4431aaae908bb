//! End-to-end tests: snapshot parsing, registry, dispatcher and step loop
//! working together against an in-memory browser.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};

use pagepilot_actions_browser::register_default_actions;
use pagepilot_core::{ActionDispatcher, ActionRegistryBuilder};
use pagepilot_dom::{DomNode, DomTree, ElementIndex, ElementTarget};
use pagepilot_protocols::{
    AbortSignal, ActionContext, AgentError, BrowserDriver, BrowserError, Decision, DecisionError,
    DecisionMaker, DecisionRequest, PageSnapshot,
};
use pagepilot_runtime::{StepLoop, StepLoopConfig, StepStatus};

/// Two-page site: a search form that leads to a results page.
struct FakeSite {
    url: Mutex<String>,
    typed: Mutex<Option<String>>,
    clicks: Mutex<Vec<String>>,
}

impl FakeSite {
    fn new() -> Self {
        Self {
            url: Mutex::new("https://search.example".to_string()),
            typed: Mutex::new(None),
            clicks: Mutex::new(Vec::new()),
        }
    }

    fn dom(&self) -> Value {
        if self.url.lock().contains("/results") {
            json!({
                "type": "ELEMENT_NODE",
                "tagName": "body",
                "children": [
                    {"type": "ELEMENT_NODE", "tagName": "a", "xpath": "/html/body/a", "highlightIndex": 0,
                     "attributes": {"href": "/docs"},
                     "children": [{"type": "TEXT_NODE", "text": "Rust docs"}]}
                ]
            })
        } else {
            json!({
                "type": "ELEMENT_NODE",
                "tagName": "body",
                "children": [
                    {"type": "ELEMENT_NODE", "tagName": "input", "xpath": "/html/body/input", "highlightIndex": 0,
                     "attributes": {"type": "search", "placeholder": "Search"}},
                    {"type": "ELEMENT_NODE", "tagName": "button", "xpath": "/html/body/button", "highlightIndex": 1,
                     "children": [{"type": "TEXT_NODE", "text": "Go"}]}
                ]
            })
        }
    }
}

#[async_trait]
impl BrowserDriver for FakeSite {
    async fn snapshot(&self) -> Result<PageSnapshot, BrowserError> {
        let url = self.url.lock().clone();
        Ok(PageSnapshot::new(url, "Fake search").with_dom(self.dom()))
    }

    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        *self.url.lock() = url.to_string();
        Ok(())
    }

    async fn click(&self, target: &ElementTarget) -> Result<(), BrowserError> {
        self.clicks.lock().push(target.xpath.clone());
        if target.tag_name == "button" && self.typed.lock().is_some() {
            *self.url.lock() = "https://search.example/results".to_string();
        }
        Ok(())
    }

    async fn input_text(&self, target: &ElementTarget, text: &str) -> Result<(), BrowserError> {
        if target.tag_name != "input" {
            return Err(BrowserError::ElementNotFound(target.xpath.clone()));
        }
        *self.typed.lock() = Some(text.to_string());
        Ok(())
    }

    async fn page_content(&self, _include_links: bool) -> Result<String, BrowserError> {
        Ok("Rust docs".to_string())
    }
}

/// Replays raw model outputs through the decision wire format.
struct ReplayModel {
    outputs: Mutex<VecDeque<Result<Value, DecisionError>>>,
    requests: Mutex<Vec<DecisionRequest>>,
}

impl ReplayModel {
    fn new(outputs: Vec<Result<Value, DecisionError>>) -> Self {
        Self {
            outputs: Mutex::new(outputs.into()),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DecisionMaker for ReplayModel {
    async fn decide(&self, request: DecisionRequest) -> Result<Decision, DecisionError> {
        self.requests.lock().push(request);
        let output = self
            .outputs
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(DecisionError::Transport("no more outputs".to_string())))?;
        Decision::from_model_output(&output)
    }
}

fn dispatcher(excluded: &[&str]) -> ActionDispatcher {
    let mut builder = ActionRegistryBuilder::with_excluded(excluded.iter().copied());
    register_default_actions(&mut builder).unwrap();
    ActionDispatcher::new(Arc::new(builder.build()))
}

#[test]
fn test_parse_element_with_text_child() {
    let raw = json!({
        "type": "ELEMENT_NODE",
        "tagName": "div",
        "children": [{"type": "TEXT_NODE", "text": "Hello, World!", "isVisible": true}]
    });
    let tree = DomTree::parse(&raw).unwrap();
    let root = tree.root();
    assert_eq!(tree.element(root).unwrap().tag_name, "div");

    let children = tree.children(root);
    assert_eq!(children.len(), 1);
    match tree.node(children[0]).unwrap() {
        DomNode::Text(text) => {
            assert_eq!(text.text, "Hello, World!");
            assert_eq!(text.parent, Some(root));
        }
        DomNode::Element(_) => panic!("expected a text node"),
    }
    assert!(DomTree::parse(&Value::Null).is_none());
}

#[tokio::test]
async fn test_dispatch_unknown_action() {
    let dispatcher = dispatcher(&[]);
    let index = ElementIndex::empty();
    let site = FakeSite::new();
    let signal = AbortSignal::new();
    let ctx = ActionContext::new(&index, &site, &signal);

    let result = dispatcher.dispatch("does_not_exist", &json!({}), &ctx).await;
    assert!(!result.error.unwrap_or_default().is_empty());
    assert!(!result.is_done);
}

#[tokio::test]
async fn test_search_flow_runs_to_completion() {
    let site = Arc::new(FakeSite::new());
    let model = Arc::new(ReplayModel::new(vec![
        Ok(json!({
            "current_state": {"evaluation_previous_goal": "Unknown", "memory": "", "next_goal": "search"},
            "action": [
                {"input_text": {"index": 0, "text": "rust"}},
                {"click_element": {"index": "1"}}
            ]
        })),
        Ok(json!({
            "current_state": {"evaluation_previous_goal": "Success", "memory": "", "next_goal": "read"},
            "action": [{"extract_content": {}}]
        })),
        Ok(json!({"action": [{"done": {"text": "Rust docs"}}]})),
    ]));
    let mut agent = StepLoop::new(
        "search for rust",
        site.clone(),
        model.clone(),
        dispatcher(&[]),
        StepLoopConfig::default(),
    );

    let history = agent.run(10).await.unwrap();
    assert!(history.is_done());
    assert_eq!(history.final_result(), Some("Rust docs"));
    assert_eq!(
        history.urls(),
        vec![
            "https://search.example",
            "https://search.example/results",
            "https://search.example/results"
        ]
    );
    assert_eq!(history.errors(), vec![None, None, None]);
    assert_eq!(
        history.history[0].brain.as_ref().map(|b| b.next_goal.as_str()),
        Some("search")
    );
    assert_eq!(*site.clicks.lock(), vec!["/html/body/button".to_string()]);

    let requests = model.requests.lock();
    assert!(requests[0].elements.contains("[0]<input type=\"search\" placeholder=\"Search\"></input>"));
    assert!(requests[1].elements.contains("[0]<a>Rust docs</a>"));
    assert!(requests[2].memory[0].starts_with("Action result: Extracted page content"));
}

#[tokio::test]
async fn test_done_first_skips_second_action() {
    let site = Arc::new(FakeSite::new());
    let model = Arc::new(ReplayModel::new(vec![Ok(json!({
        "action": [
            {"done": {"text": "nothing to do"}},
            {"click_element": {"index": 1}}
        ]
    }))]));
    let mut agent = StepLoop::new("noop", site.clone(), model, dispatcher(&[]), StepLoopConfig::default());

    assert_eq!(agent.step().await.unwrap(), StepStatus::Done);
    assert!(site.clicks.lock().is_empty());
    assert_eq!(agent.state().last_results.len(), 1);
}

#[tokio::test]
async fn test_malformed_model_output_is_one_failure() {
    let site = Arc::new(FakeSite::new());
    let model = Arc::new(ReplayModel::new(vec![
        Ok(json!({"action": "click everything"})),
        Ok(json!({"action": [{"click_element": {"index": 1}}]})),
    ]));
    let mut agent = StepLoop::new("task", site, model, dispatcher(&[]), StepLoopConfig::default());

    agent.step().await.unwrap();
    assert_eq!(agent.state().consecutive_failures, 1);
    assert_eq!(agent.state().last_results.len(), 1);
    assert!(agent.state().last_results[0]
        .error
        .as_ref()
        .is_some_and(|e| e.contains("Malformed decision output")));

    agent.step().await.unwrap();
    assert_eq!(agent.state().consecutive_failures, 0);
}

#[tokio::test]
async fn test_repeated_failures_abort_the_run() {
    let site = Arc::new(FakeSite::new());
    let model = Arc::new(ReplayModel::new(vec![
        Ok(json!({"action": [{"input_text": {"index": 1, "text": "x"}}]})),
        Ok(json!({"action": [{"click_element": {"index": 99}}]})),
    ]));
    let config = StepLoopConfig::default().with_max_failures(2);
    let mut agent = StepLoop::new("task", site, model, dispatcher(&[]), config);

    let err = agent.run(10).await.unwrap_err();
    assert_eq!(err, AgentError::TooManyFailures { failures: 2, max: 2 });
    let errors = agent.history().errors();
    assert!(errors[0].as_ref().unwrap().contains("Browser error"));
    assert_eq!(
        errors[1].as_deref(),
        Some("Element with index 99 does not exist - retry or use alternative actions")
    );
}

#[tokio::test]
async fn test_excluded_actions_are_hidden_and_rejected() {
    let site = Arc::new(FakeSite::new());
    let model = Arc::new(ReplayModel::new(vec![Ok(json!({
        "action": [{"search_google": {"query": "rust"}}]
    }))]));
    let mut agent = StepLoop::new(
        "task",
        site.clone(),
        model.clone(),
        dispatcher(&["search_google"]),
        StepLoopConfig::default(),
    );

    agent.step().await.unwrap();
    let requests = model.requests.lock();
    assert!(requests[0].actions.iter().all(|a| a.name != "search_google"));
    assert!(requests[0].actions.iter().any(|a| a.name == "go_to_url"));

    let error = agent.state().last_results[0].error.clone().unwrap();
    assert!(error.contains("Action not found: search_google"));
    assert_eq!(*site.url.lock(), "https://search.example");
}
