//! BrowserDriver trait definition.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use pagepilot_dom::ElementTarget;

use super::PageSnapshot;
use crate::error::BrowserError;

/// Scroll direction for [`BrowserDriver::scroll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Core trait for browser drivers.
///
/// Every method may suspend for a long time. Calls from one loop are strictly
/// sequential, and the side effects of one call must be visible before the
/// next call starts.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Capture the current page: url, title, tabs, screenshot and the raw
    /// DOM payload from the injected script.
    async fn snapshot(&self) -> Result<PageSnapshot, BrowserError>;

    /// Navigate the current tab.
    async fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// Click an element.
    async fn click(&self, target: &ElementTarget) -> Result<(), BrowserError>;

    /// Replace the text of an input element.
    async fn input_text(&self, target: &ElementTarget, text: &str) -> Result<(), BrowserError>;

    /// Go back in history.
    async fn go_back(&self) -> Result<(), BrowserError> {
        Err(BrowserError::Unsupported("go_back".to_string()))
    }

    /// Make another tab current.
    async fn switch_tab(&self, page_id: u32) -> Result<(), BrowserError> {
        let _ = page_id;
        Err(BrowserError::Unsupported("switch_tab".to_string()))
    }

    /// Open a url in a new tab and make it current.
    async fn open_tab(&self, url: &str) -> Result<(), BrowserError> {
        let _ = url;
        Err(BrowserError::Unsupported("open_tab".to_string()))
    }

    /// Scroll by `amount` pixels, or one viewport height when `None`.
    async fn scroll(&self, direction: ScrollDirection, amount: Option<i64>) -> Result<(), BrowserError> {
        let _ = (direction, amount);
        Err(BrowserError::Unsupported("scroll".to_string()))
    }

    /// Send a key sequence such as `"Enter"` or `"Control+a"`.
    async fn send_keys(&self, keys: &str) -> Result<(), BrowserError> {
        let _ = keys;
        Err(BrowserError::Unsupported("send_keys".to_string()))
    }

    /// Readable page content (markdown-like text).
    async fn page_content(&self, include_links: bool) -> Result<String, BrowserError> {
        let _ = include_links;
        Err(BrowserError::Unsupported("page_content".to_string()))
    }
}
