//! Action execution result types.

use serde::{Deserialize, Serialize};

/// Outcome of one dispatched action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Content produced by the action (extracted text, confirmation, final answer).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_content: Option<String>,

    /// Error message if the action failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Whether this result is shown to the decision-maker on the next step.
    #[serde(default)]
    pub include_in_memory: bool,

    /// Whether this result finishes the task.
    #[serde(default)]
    pub is_done: bool,
}

impl ActionResult {
    /// Successful result kept in memory.
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            extracted_content: Some(content.into()),
            include_in_memory: true,
            ..Self::default()
        }
    }

    /// Terminal result carrying the final answer.
    pub fn done(content: impl Into<String>) -> Self {
        Self {
            extracted_content: Some(content.into()),
            is_done: true,
            ..Self::default()
        }
    }

    /// Error result, always kept in memory so the decision-maker can
    /// self-correct.
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            include_in_memory: true,
            ..Self::default()
        }
    }

    /// Override memory retention.
    pub fn with_memory(mut self, include_in_memory: bool) -> Self {
        self.include_in_memory = include_in_memory;
        self
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Line shown to the decision-maker, if this result is retained.
    pub fn memory_line(&self) -> Option<String> {
        if !self.include_in_memory {
            return None;
        }
        match (&self.error, &self.extracted_content) {
            (Some(error), _) => Some(format!("Action error: {}", error)),
            (None, Some(content)) => Some(format!("Action result: {}", content)),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_result_success() {
        let result = ActionResult::success("Clicked button with index 3");
        assert_eq!(
            result.extracted_content.as_deref(),
            Some("Clicked button with index 3")
        );
        assert!(result.include_in_memory);
        assert!(!result.is_done);
        assert!(!result.is_error());
    }

    #[test]
    fn test_action_result_done() {
        let result = ActionResult::done("The answer is 42");
        assert!(result.is_done);
        assert!(!result.include_in_memory);
        assert!(!result.is_error());
    }

    #[test]
    fn test_action_result_error() {
        let result = ActionResult::error("Element not found");
        assert!(result.is_error());
        assert!(result.include_in_memory);
        assert!(!result.is_done);
        assert!(result.extracted_content.is_none());
    }

    #[test]
    fn test_action_result_with_memory() {
        let result = ActionResult::success("scrolled").with_memory(false);
        assert!(!result.include_in_memory);
        assert!(result.memory_line().is_none());
    }

    #[test]
    fn test_memory_line() {
        assert_eq!(
            ActionResult::success("page loaded").memory_line().as_deref(),
            Some("Action result: page loaded")
        );
        assert_eq!(
            ActionResult::error("timeout").memory_line().as_deref(),
            Some("Action error: timeout")
        );
        assert!(ActionResult::default().with_memory(true).memory_line().is_none());
    }

    #[test]
    fn test_action_result_serialization() {
        let json = serde_json::to_value(ActionResult::error("boom")).unwrap();
        assert_eq!(json["error"], "boom");
        assert_eq!(json["include_in_memory"], true);
        assert_eq!(json["is_done"], false);
        assert!(json.get("extracted_content").is_none());
    }

    #[test]
    fn test_action_result_deserialize_defaults() {
        let result: ActionResult = serde_json::from_str(r#"{"extracted_content": "x"}"#).unwrap();
        assert_eq!(result.extracted_content.as_deref(), Some("x"));
        assert!(!result.include_in_memory);
        assert!(!result.is_done);
    }
}
