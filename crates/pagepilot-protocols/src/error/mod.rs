//! Error types for the PagePilot protocol layer.

mod action;
mod agent;
mod browser;
mod decision;
mod registry;

pub use action::*;
pub use agent::*;
pub use browser::*;
pub use decision::*;
pub use registry::*;
