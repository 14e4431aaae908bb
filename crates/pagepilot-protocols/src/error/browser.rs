//! Browser driver errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Tab not found: {0}")]
    TabNotFound(u32),

    #[error("Script evaluation failed: {0}")]
    ScriptFailed(String),

    #[error("Browser operation timed out after {0} ms")]
    Timeout(u64),

    #[error("Browser disconnected: {0}")]
    Disconnected(String),

    #[error("Operation not supported by this driver: {0}")]
    Unsupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_error_display() {
        let errors = vec![
            BrowserError::NavigationFailed("net::ERR_NAME_NOT_RESOLVED".to_string()),
            BrowserError::ElementNotFound("/html/body/a".to_string()),
            BrowserError::TabNotFound(3),
            BrowserError::ScriptFailed("ReferenceError".to_string()),
            BrowserError::Timeout(30_000),
            BrowserError::Disconnected("socket closed".to_string()),
            BrowserError::Unsupported("send_keys".to_string()),
        ];
        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn test_browser_error_timeout() {
        let err = BrowserError::Timeout(500);
        assert!(err.to_string().contains("500 ms"));
    }

    #[test]
    fn test_browser_error_tab_not_found() {
        let err = BrowserError::TabNotFound(7);
        assert!(err.to_string().contains('7'));
    }
}
