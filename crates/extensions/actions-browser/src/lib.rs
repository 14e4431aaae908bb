//! Default browser actions for PagePilot.
//!
//! ## Actions
//!
//! ### Navigation
//! - `search_google` - Search the query in Google in the current tab
//! - `go_to_url` - Navigate to a URL in the current tab
//! - `go_back` - Go back in history
//! - `switch_tab` - Make another tab current
//! - `open_tab` - Open a URL in a new tab
//!
//! ### Element Interaction
//! - `click_element` - Click an element by highlight index
//! - `input_text` - Type into an element by highlight index
//! - `send_keys` - Send special keys or shortcuts
//!
//! ### Content
//! - `extract_content` - Page content, kept in memory
//! - `scroll_down` / `scroll_up` - Scroll by pixels or one page
//! - `done` - Finish the task with a final answer
//!
//! Elements are addressed by the highlight index of the current snapshot;
//! an optional xpath overrides the located element's own xpath.

mod actions;

use pagepilot_core::ActionRegistryBuilder;
use pagepilot_protocols::RegistryError;

pub use actions::*;

/// Names of the default actions, in registration order.
pub const DEFAULT_ACTIONS: &[&str] = &[
    "search_google",
    "go_to_url",
    "go_back",
    "click_element",
    "input_text",
    "switch_tab",
    "open_tab",
    "extract_content",
    "scroll_down",
    "scroll_up",
    "send_keys",
    "done",
];

/// Register every default action. Names on the builder's exclusion list are
/// skipped by the builder.
pub fn register_default_actions(builder: &mut ActionRegistryBuilder) -> Result<(), RegistryError> {
    builder
        .register_action(SearchGoogleAction)?
        .register_action(GoToUrlAction)?
        .register_action(GoBackAction)?
        .register_action(ClickElementAction)?
        .register_action(InputTextAction)?
        .register_action(SwitchTabAction)?
        .register_action(OpenTabAction)?
        .register_action(ExtractContentAction)?
        .register_action(ScrollAction::down())?
        .register_action(ScrollAction::up())?
        .register_action(SendKeysAction)?
        .register_action(DoneAction)?;
    Ok(())
}
