//! Per-step run history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pagepilot_dom::ElementTarget;
use pagepilot_protocols::{ActionIntent, ActionResult, AgentBrain};

/// Record of one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentHistory {
    pub step_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brain: Option<AgentBrain>,
    /// Intents that were dispatched, in order.
    #[serde(default)]
    pub intents: Vec<ActionIntent>,
    /// One result per dispatched intent, or a single step-level error.
    pub results: Vec<ActionResult>,
    /// Element each intent referred to, when it named a highlight index
    /// present in the snapshot.
    #[serde(default)]
    pub targets: Vec<Option<ElementTarget>>,
    pub url: String,
    pub title: String,
    pub timestamp: DateTime<Utc>,
}

impl AgentHistory {
    pub fn is_done(&self) -> bool {
        self.results.iter().any(|r| r.is_done)
    }

    pub fn has_error(&self) -> bool {
        self.results.iter().any(ActionResult::is_error)
    }
}

/// History of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentHistoryList {
    pub history: Vec<AgentHistory>,
}

impl AgentHistoryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: AgentHistory) {
        self.history.push(entry);
    }

    pub fn last(&self) -> Option<&AgentHistory> {
        self.history.last()
    }

    /// Whether the last step finished the task.
    pub fn is_done(&self) -> bool {
        self.last().is_some_and(AgentHistory::is_done)
    }

    /// Content of the last result of the last step.
    pub fn final_result(&self) -> Option<&str> {
        self.last()?.results.last()?.extracted_content.as_deref()
    }

    /// Error messages per step, `None` for steps without errors.
    pub fn errors(&self) -> Vec<Option<String>> {
        self.history
            .iter()
            .map(|h| h.results.iter().find_map(|r| r.error.clone()))
            .collect()
    }

    /// Page url at each step.
    pub fn urls(&self) -> Vec<&str> {
        self.history.iter().map(|h| h.url.as_str()).collect()
    }

    pub fn total_steps(&self) -> usize {
        self.history.len()
    }
}
