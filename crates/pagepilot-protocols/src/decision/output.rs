//! Decisions returned by the decision-maker.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::ActionIntent;
use crate::error::DecisionError;

/// The decision-maker's own account of progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentBrain {
    #[serde(default)]
    pub evaluation_previous_goal: String,
    #[serde(default)]
    pub memory: String,
    #[serde(default)]
    pub next_goal: String,
}

/// One answer of the decision-maker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brain: Option<AgentBrain>,

    /// Actions to dispatch, in order.
    pub actions: Vec<ActionIntent>,
}

impl Decision {
    pub fn new(actions: Vec<ActionIntent>) -> Self {
        Self {
            brain: None,
            actions,
        }
    }

    pub fn with_brain(mut self, brain: AgentBrain) -> Self {
        self.brain = Some(brain);
        self
    }

    /// Parse the structured model output
    /// `{"current_state": {...}, "action": [{"<name>": {<params>}}, ...]}`.
    pub fn from_model_output(output: &Value) -> Result<Self, DecisionError> {
        let obj = output
            .as_object()
            .ok_or_else(|| DecisionError::MalformedOutput("output must be an object".to_string()))?;

        let brain = match obj.get("current_state") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(serde_json::from_value(raw.clone()).map_err(|e| {
                DecisionError::MalformedOutput(format!("invalid current_state: {}", e))
            })?),
        };

        let raw_actions = obj
            .get("action")
            .and_then(Value::as_array)
            .ok_or_else(|| DecisionError::MalformedOutput("missing 'action' array".to_string()))?;

        let actions = raw_actions
            .iter()
            .enumerate()
            .map(|(i, raw)| parse_action(i, raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { brain, actions })
    }
}

fn parse_action(position: usize, raw: &Value) -> Result<ActionIntent, DecisionError> {
    let obj = raw.as_object().ok_or_else(|| {
        DecisionError::MalformedOutput(format!("action {} must be an object", position))
    })?;

    // Models fill every optional action slot with null; keep the one that is set.
    let mut set = obj.iter().filter(|(_, params)| !params.is_null());
    match (set.next(), set.next()) {
        (Some((name, params)), None) => Ok(ActionIntent::new(name.clone(), params.clone())),
        (None, _) if obj.len() == 1 => {
            let (name, _) = obj.iter().next().ok_or_else(|| {
                DecisionError::MalformedOutput(format!("action {} is empty", position))
            })?;
            Ok(ActionIntent::new(name.clone(), Value::Object(Default::default())))
        }
        (None, _) => Err(DecisionError::MalformedOutput(format!(
            "action {} names no action",
            position
        ))),
        (Some(_), Some(_)) => Err(DecisionError::MalformedOutput(format!(
            "action {} names more than one action",
            position
        ))),
    }
}
