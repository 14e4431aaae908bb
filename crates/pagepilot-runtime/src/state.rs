//! Loop state.

use serde::{Deserialize, Serialize};

use pagepilot_protocols::ActionResult;

/// Phase of the step loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopPhase {
    Observing,
    Deciding,
    Dispatching,
    Recording,
    Terminated,
}

/// Outcome of a step that did not end the run with an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Another step is needed.
    Continue,
    /// A result with `is_done` was recorded.
    Done,
}

/// State owned by one step loop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    /// Steps in a row that ended with at least one error result.
    pub consecutive_failures: u32,
    /// Results of the most recent step, in dispatch order.
    pub last_results: Vec<ActionResult>,
    /// Steps recorded so far.
    pub n_steps: u32,
}

impl AgentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the results of one step. Returns whether the step failed.
    ///
    /// A step with any error result counts as one failure, however many
    /// errors it has; a step without errors resets the counter.
    pub fn record_step(&mut self, results: Vec<ActionResult>) -> bool {
        let failed = results.iter().any(ActionResult::is_error);
        if failed {
            self.consecutive_failures += 1;
        } else {
            self.consecutive_failures = 0;
        }
        self.last_results = results;
        self.n_steps += 1;
        failed
    }

    /// Lines of the last step retained for the decision-maker.
    pub fn memory(&self) -> Vec<String> {
        self.last_results
            .iter()
            .filter_map(ActionResult::memory_line)
            .collect()
    }

    pub fn is_done(&self) -> bool {
        self.last_results.iter().any(|r| r.is_done)
    }
}
