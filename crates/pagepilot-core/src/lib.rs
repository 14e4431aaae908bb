//! # PagePilot Core
//!
//! Action registration and dispatch.
//!
//! ## Components
//!
//! - [`ParamSchema`] - JSON schema of an action's parameters, with coercion
//! - [`Action`] - typed action handlers
//! - [`ActionRegistryBuilder`] / [`ActionRegistry`] - populate once, read many
//! - [`ActionDispatcher`] - validate and run one action, always yielding an
//!   [`ActionResult`](pagepilot_protocols::ActionResult)

pub mod action;
pub mod dispatcher;
pub mod registry;
pub mod schema;

pub use action::{Action, ActionHandler, NoParams, TypedHandler};
pub use dispatcher::ActionDispatcher;
pub use registry::{ActionRegistry, ActionRegistryBuilder, ActionSpec};
pub use schema::ParamSchema;
