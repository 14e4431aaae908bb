//! # PagePilot Protocols
//!
//! Interface definitions shared by the PagePilot crates.
//! Contains only traits and data types - no implementations.
//!
//! ## Core Traits
//!
//! - [`BrowserDriver`] - Page snapshots and page mutation (navigation, click, input)
//! - [`DecisionMaker`] - Chooses the next actions from the current page state
//!
//! ## Data Types
//!
//! - [`ActionResult`] - Outcome of one dispatched action
//! - [`ActionIntent`] - An action name plus raw parameters chosen by the decision-maker
//! - [`ActionContext`] - What a handler may touch while it runs
//! - [`BrowserState`] - One observation of the page

pub mod action;
pub mod browser;
pub mod decision;
pub mod error;

pub use action::{AbortSignal, ActionContext, ActionIntent, ActionResult};
pub use browser::{BrowserDriver, BrowserState, PageSnapshot, ScrollDirection, TabInfo};
pub use decision::{ActionDescriptor, AgentBrain, Decision, DecisionMaker, DecisionRequest};
pub use error::{ActionError, AgentError, BrowserError, DecisionError, RegistryError};
