//! Decision request types.

use serde::{Deserialize, Serialize};

use crate::browser::TabInfo;

/// An action the decision-maker may choose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub name: String,
    pub description: String,
    /// JSON Schema of the parameters.
    pub parameters_schema: serde_json::Value,
}

impl ActionDescriptor {
    /// Convert to OpenAI function calling format.
    pub fn to_openai_function(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters_schema
            }
        })
    }

    /// Convert to Anthropic tool format.
    pub fn to_anthropic_tool(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "input_schema": self.parameters_schema
        })
    }
}

/// Everything the decision-maker gets for one step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRequest {
    pub task: String,

    /// 1-based step number.
    pub step_number: u32,

    pub url: String,
    pub title: String,
    #[serde(default)]
    pub tabs: Vec<TabInfo>,

    /// Highlighted elements, one `[index]<tag>text</tag>` line each.
    pub elements: String,

    /// Screenshot, only when vision is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,

    /// Retained content and errors of the previous step.
    #[serde(default)]
    pub memory: Vec<String>,

    /// Live registry entries.
    #[serde(default)]
    pub actions: Vec<ActionDescriptor>,
}

impl DecisionRequest {
    /// Plain-text page description as laid out in the agent prompt.
    pub fn state_description(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Current url: {}\n", self.url));
        output.push_str(&format!("Current title: {}\n", self.title));
        if !self.tabs.is_empty() {
            let tabs: Vec<String> = self
                .tabs
                .iter()
                .map(|t| format!("{}: {} ({})", t.page_id, t.title, t.url))
                .collect();
            output.push_str(&format!("Available tabs:\n{}\n", tabs.join("\n")));
        }
        output.push_str("Interactive elements:\n");
        output.push_str(&self.elements);
        for line in &self.memory {
            output.push('\n');
            output.push_str(line);
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptor() -> ActionDescriptor {
        ActionDescriptor {
            name: "click_element".to_string(),
            description: "Click element".to_string(),
            parameters_schema: json!({"type": "object", "properties": {"index": {"type": "integer"}}}),
        }
    }

    #[test]
    fn test_to_openai_function() {
        let function = descriptor().to_openai_function();
        assert_eq!(function["type"], "function");
        assert_eq!(function["function"]["name"], "click_element");
        assert_eq!(function["function"]["parameters"]["type"], "object");
    }

    #[test]
    fn test_to_anthropic_tool() {
        let tool = descriptor().to_anthropic_tool();
        assert_eq!(tool["name"], "click_element");
        assert_eq!(tool["input_schema"]["properties"]["index"]["type"], "integer");
    }

    #[test]
    fn test_state_description() {
        let request = DecisionRequest {
            task: "find docs".to_string(),
            step_number: 2,
            url: "https://example.com".to_string(),
            title: "Example".to_string(),
            tabs: vec![TabInfo {
                page_id: 0,
                url: "https://example.com".to_string(),
                title: "Example".to_string(),
            }],
            elements: "[0]<a>Docs</a>".to_string(),
            screenshot: None,
            memory: vec!["Action error: timeout".to_string()],
            actions: vec![descriptor()],
        };

        let text = request.state_description();
        assert!(text.contains("Current url: https://example.com"));
        assert!(text.contains("0: Example (https://example.com)"));
        assert!(text.contains("[0]<a>Docs</a>"));
        assert!(text.ends_with("Action error: timeout"));
    }
}
