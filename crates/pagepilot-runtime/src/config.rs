//! Step loop configuration.

use pagepilot_dom::DEFAULT_INCLUDE_ATTRIBUTES;

/// Configuration for the step loop.
#[derive(Debug, Clone)]
pub struct StepLoopConfig {
    /// Consecutive failed steps that abort the run.
    pub max_failures: u32,
    /// Intents beyond this count are dropped.
    pub max_actions_per_step: usize,
    /// Send screenshots to the decision-maker.
    pub use_vision: bool,
    /// Attributes rendered next to highlighted elements.
    pub include_attributes: Vec<String>,
}

impl Default for StepLoopConfig {
    fn default() -> Self {
        Self {
            max_failures: 3,
            max_actions_per_step: 10,
            use_vision: true,
            include_attributes: DEFAULT_INCLUDE_ATTRIBUTES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl StepLoopConfig {
    pub fn with_max_failures(mut self, max_failures: u32) -> Self {
        self.max_failures = max_failures;
        self
    }

    pub fn with_max_actions_per_step(mut self, max_actions_per_step: usize) -> Self {
        self.max_actions_per_step = max_actions_per_step;
        self
    }

    pub fn with_vision(mut self, use_vision: bool) -> Self {
        self.use_vision = use_vision;
        self
    }
}
