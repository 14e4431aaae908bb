//! # PagePilot Runtime
//!
//! The step loop: observe the page, ask the decision-maker, dispatch the
//! chosen actions, record the results.
//!
//! ## Components
//!
//! - [`StepLoop`] - one agent driving one browser session
//! - [`AgentState`] - failure counter and results of the last step
//! - [`AgentHistoryList`] - per-step record of a run

pub mod config;
pub mod history;
pub mod state;
pub mod step_loop;

pub use config::StepLoopConfig;
pub use history::{AgentHistory, AgentHistoryList};
pub use state::{AgentState, LoopPhase, StepStatus};
pub use step_loop::StepLoop;
