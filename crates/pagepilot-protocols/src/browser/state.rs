//! Page snapshots and parsed browser state.

use serde::{Deserialize, Serialize};

use pagepilot_dom::{DomError, DomTree, ElementIndex};

/// An open tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    pub page_id: u32,
    pub url: String,
    pub title: String,
}

/// Raw capture returned by [`BrowserDriver::snapshot`](super::BrowserDriver::snapshot).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub tabs: Vec<TabInfo>,
    /// Base64-encoded screenshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    /// Untyped payload from the injected DOM script; may be null.
    #[serde(default)]
    pub dom: serde_json::Value,
}

impl PageSnapshot {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_dom(mut self, dom: serde_json::Value) -> Self {
        self.dom = dom;
        self
    }

    pub fn with_tabs(mut self, tabs: Vec<TabInfo>) -> Self {
        self.tabs = tabs;
        self
    }

    pub fn with_screenshot(mut self, screenshot: impl Into<String>) -> Self {
        self.screenshot = Some(screenshot.into());
        self
    }
}

/// One observation of the page with its parsed element tree.
///
/// Valid for a single step only: highlight indices are not stable across
/// snapshots.
#[derive(Debug, Clone)]
pub struct BrowserState {
    pub url: String,
    pub title: String,
    pub element_tree: Option<DomTree>,
    pub tabs: Vec<TabInfo>,
    pub screenshot: Option<String>,
}

impl BrowserState {
    /// Parse the raw DOM payload of a snapshot.
    pub fn from_snapshot(snapshot: PageSnapshot) -> Self {
        Self {
            element_tree: DomTree::parse(&snapshot.dom),
            url: snapshot.url,
            title: snapshot.title,
            tabs: snapshot.tabs,
            screenshot: snapshot.screenshot,
        }
    }

    /// Highlight-index lookup for this state. Empty when the snapshot had no
    /// tree.
    pub fn selector_map(&self) -> Result<ElementIndex<'_>, DomError> {
        match &self.element_tree {
            Some(tree) => tree.element_index(),
            None => Ok(ElementIndex::empty()),
        }
    }

    /// Highlighted elements rendered for the decision-maker.
    pub fn render_elements(&self, include_attributes: &[&str]) -> String {
        self.element_tree
            .as_ref()
            .map(|tree| tree.clickable_elements_to_string(include_attributes))
            .unwrap_or_default()
    }
}
