//! Action intents produced by the decision-maker.

use serde::{Deserialize, Serialize};

/// One action chosen by the decision-maker: a registered name and its raw,
/// not yet validated parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionIntent {
    pub name: String,

    #[serde(default)]
    pub params: serde_json::Value,
}

impl ActionIntent {
    pub fn new(name: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// Highlight index the intent refers to, if its parameters carry one.
    pub fn element_index(&self) -> Option<u32> {
        let raw = self.params.get("index")?;
        raw.as_u64()
            .or_else(|| raw.as_str().and_then(|s| s.trim().parse().ok()))
            .and_then(|v| u32::try_from(v).ok())
    }
}
