//! Action protocol definitions.
//!
//! Actions are the only way the agent changes the page.

mod context;
mod intent;
mod result;

pub use context::*;
pub use intent::*;
pub use result::*;
