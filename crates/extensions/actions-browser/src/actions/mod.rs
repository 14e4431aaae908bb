//! Browser action implementations.

mod content;
mod interaction;
mod navigation;

pub use content::*;
pub use interaction::*;
pub use navigation::*;
