//! Step loop implementation.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use pagepilot_core::ActionDispatcher;
use pagepilot_protocols::{
    AbortSignal, ActionContext, ActionIntent, ActionResult, AgentBrain, AgentError,
    BrowserDriver, BrowserState, DecisionError, DecisionMaker, DecisionRequest,
};

use crate::config::StepLoopConfig;
use crate::history::{AgentHistory, AgentHistoryList};
use crate::state::{AgentState, LoopPhase, StepStatus};

/// What one step produced, before it is recorded.
struct StepRecord {
    brain: Option<AgentBrain>,
    intents: Vec<ActionIntent>,
    results: Vec<ActionResult>,
    targets: Vec<Option<pagepilot_dom::ElementTarget>>,
    url: String,
    title: String,
}

impl StepRecord {
    fn failure(url: String, title: String, message: String) -> Self {
        Self {
            brain: None,
            intents: Vec::new(),
            results: vec![ActionResult::error(message)],
            targets: Vec::new(),
            url,
            title,
        }
    }
}

/// One agent working one task in one browser session.
///
/// Steps run strictly one after another; the loop borrows itself mutably for
/// every step, so a session cannot be driven by two loops at once.
pub struct StepLoop {
    task: String,
    browser: Arc<dyn BrowserDriver>,
    decision_maker: Arc<dyn DecisionMaker>,
    dispatcher: ActionDispatcher,
    config: StepLoopConfig,
    abort_signal: Arc<AbortSignal>,
    state: AgentState,
    history: AgentHistoryList,
    phase: LoopPhase,
}

impl StepLoop {
    pub fn new(
        task: impl Into<String>,
        browser: Arc<dyn BrowserDriver>,
        decision_maker: Arc<dyn DecisionMaker>,
        dispatcher: ActionDispatcher,
        config: StepLoopConfig,
    ) -> Self {
        Self {
            task: task.into(),
            browser,
            decision_maker,
            dispatcher,
            config,
            abort_signal: Arc::new(AbortSignal::new()),
            state: AgentState::new(),
            history: AgentHistoryList::new(),
            phase: LoopPhase::Observing,
        }
    }

    /// Share an externally owned abort signal.
    pub fn with_abort_signal(mut self, abort_signal: Arc<AbortSignal>) -> Self {
        self.abort_signal = abort_signal;
        self
    }

    pub fn abort_signal(&self) -> Arc<AbortSignal> {
        self.abort_signal.clone()
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn history(&self) -> &AgentHistoryList {
        &self.history
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    /// Run steps until the task is done.
    ///
    /// Returns the history when a done result was recorded. The state and
    /// history stay available through the accessors after an error.
    pub async fn run(&mut self, max_steps: u32) -> Result<&AgentHistoryList, AgentError> {
        info!(run_id = %self.abort_signal.id(), task = %self.task, "Starting run");

        for _ in 0..max_steps {
            if self.step().await? == StepStatus::Done {
                info!(
                    run_id = %self.abort_signal.id(),
                    steps = self.history.total_steps(),
                    "Task completed"
                );
                return Ok(&self.history);
            }
        }

        warn!(run_id = %self.abort_signal.id(), max_steps, "Step limit reached");
        self.phase = LoopPhase::Terminated;
        Err(AgentError::MaxStepsExceeded(max_steps))
    }

    /// Run one observe, decide, dispatch, record cycle.
    pub async fn step(&mut self) -> Result<StepStatus, AgentError> {
        if self.state.is_done() {
            return Ok(StepStatus::Done);
        }
        self.check_failures()?;
        if self.abort_signal.is_aborted() {
            info!(run_id = %self.abort_signal.id(), "Run cancelled");
            self.phase = LoopPhase::Terminated;
            return Err(AgentError::Cancelled);
        }

        let step_number = self.state.n_steps + 1;
        info!(step = step_number, "Starting step");

        let Some(record) = self.execute(step_number).await else {
            info!(run_id = %self.abort_signal.id(), step = step_number, "Run cancelled before dispatch");
            self.phase = LoopPhase::Terminated;
            return Err(AgentError::Cancelled);
        };
        let status = self.record(step_number, record)?;

        // Cancellation between actions still records the partial step.
        if status == StepStatus::Continue && self.abort_signal.is_aborted() {
            info!(run_id = %self.abort_signal.id(), "Run cancelled");
            self.phase = LoopPhase::Terminated;
            return Err(AgentError::Cancelled);
        }
        Ok(status)
    }

    /// `None` when the run was cancelled before any action was dispatched.
    async fn execute(&mut self, step_number: u32) -> Option<StepRecord> {
        self.phase = LoopPhase::Observing;
        let snapshot = match self.browser.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(step = step_number, error = %e, "Observation failed");
                return Some(StepRecord::failure(
                    String::new(),
                    String::new(),
                    format!("Failed to observe page: {}", e),
                ));
            }
        };

        let browser_state = BrowserState::from_snapshot(snapshot);
        let index = match browser_state.selector_map() {
            Ok(index) => index,
            Err(e) => {
                warn!(step = step_number, error = %e, "Invalid snapshot");
                return Some(StepRecord::failure(
                    browser_state.url.clone(),
                    browser_state.title.clone(),
                    format!("Invalid page snapshot: {}", e),
                ));
            }
        };
        debug!(step = step_number, elements = index.len(), url = %browser_state.url, "Observed page");

        self.phase = LoopPhase::Deciding;
        let request = self.build_request(step_number, &browser_state);
        let decision = self
            .decision_maker
            .decide(request)
            .await
            .map(|mut decision| {
                if decision.actions.len() > self.config.max_actions_per_step {
                    warn!(
                        step = step_number,
                        requested = decision.actions.len(),
                        max = self.config.max_actions_per_step,
                        "Too many actions, truncating"
                    );
                    decision.actions.truncate(self.config.max_actions_per_step);
                }
                decision
            });
        let decision = match decision {
            Ok(decision) if decision.actions.is_empty() => Err(DecisionError::EmptyDecision),
            other => other,
        };
        let mut decision = match decision {
            Ok(decision) => decision,
            Err(e) => {
                warn!(step = step_number, error = %e, "Decision failed");
                return Some(StepRecord::failure(
                    browser_state.url.clone(),
                    browser_state.title.clone(),
                    e.to_string(),
                ));
            }
        };

        if self.abort_signal.is_aborted() {
            return None;
        }

        let mut intents = std::mem::take(&mut decision.actions);
        self.phase = LoopPhase::Dispatching;
        let ctx = ActionContext::new(&index, self.browser.as_ref(), self.abort_signal.as_ref());
        let mut results = Vec::with_capacity(intents.len());
        let mut targets = Vec::with_capacity(intents.len());

        for (i, intent) in intents.iter().enumerate() {
            if i > 0 && self.abort_signal.is_aborted() {
                debug!(step = step_number, remaining = intents.len() - i, "Cancelled between actions");
                break;
            }
            debug!(step = step_number, action = %intent.name, "Dispatching {}/{}", i + 1, intents.len());

            targets.push(intent.element_index().and_then(|idx| index.target(idx)));
            let result = self.dispatcher.dispatch_intent(intent, &ctx).await;
            let done = result.is_done;
            results.push(result);
            if done {
                break;
            }
        }
        intents.truncate(results.len());

        Some(StepRecord {
            brain: decision.brain,
            intents,
            results,
            targets,
            url: browser_state.url.clone(),
            title: browser_state.title.clone(),
        })
    }

    fn build_request(&self, step_number: u32, browser_state: &BrowserState) -> DecisionRequest {
        let include: Vec<&str> = self
            .config
            .include_attributes
            .iter()
            .map(String::as_str)
            .collect();

        DecisionRequest {
            task: self.task.clone(),
            step_number,
            url: browser_state.url.clone(),
            title: browser_state.title.clone(),
            tabs: browser_state.tabs.clone(),
            elements: browser_state.render_elements(&include),
            screenshot: if self.config.use_vision {
                browser_state.screenshot.clone()
            } else {
                None
            },
            memory: self.state.memory(),
            actions: self.dispatcher.registry().descriptors(),
        }
    }

    fn record(&mut self, step_number: u32, record: StepRecord) -> Result<StepStatus, AgentError> {
        self.phase = LoopPhase::Recording;

        let failed = self.state.record_step(record.results.clone());
        if failed {
            warn!(
                step = step_number,
                consecutive_failures = self.state.consecutive_failures,
                "Step failed"
            );
        }

        self.history.push(AgentHistory {
            step_number,
            brain: record.brain,
            intents: record.intents,
            results: record.results,
            targets: record.targets,
            url: record.url,
            title: record.title,
            timestamp: Utc::now(),
        });
        info!(step = step_number, failed, "Finished step");

        if self.state.is_done() {
            self.phase = LoopPhase::Terminated;
            return Ok(StepStatus::Done);
        }
        self.check_failures()?;

        self.phase = LoopPhase::Observing;
        Ok(StepStatus::Continue)
    }

    fn check_failures(&mut self) -> Result<(), AgentError> {
        let failures = self.state.consecutive_failures;
        let max = self.config.max_failures;
        if failures >= max {
            warn!(run_id = %self.abort_signal.id(), failures, max, "Too many consecutive failures, aborting");
            self.phase = LoopPhase::Terminated;
            return Err(AgentError::TooManyFailures { failures, max });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "step_loop_tests.rs"]
mod tests;
