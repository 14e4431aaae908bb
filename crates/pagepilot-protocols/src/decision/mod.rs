//! Decision-maker protocol definitions.
//!
//! The decision-maker (usually an LLM client) sees the page and answers with
//! one or more action intents.

mod output;
mod request;
mod traits;

pub use output::*;
pub use request::*;
pub use traits::*;
