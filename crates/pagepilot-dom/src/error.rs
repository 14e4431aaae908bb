//! DOM errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("Duplicate highlight index {index}: first at '{first_xpath}', again at '{second_xpath}'")]
    DuplicateHighlightIndex {
        index: u32,
        first_xpath: String,
        second_xpath: String,
    },
}
