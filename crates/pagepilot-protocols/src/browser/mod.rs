//! Browser driver protocol definitions.
//!
//! The driver owns the live page. This crate only describes what the agent
//! core needs from it.

mod state;
mod traits;

pub use state::*;
pub use traits::*;
