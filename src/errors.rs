//! Error types for locator generation

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// No fragment was supplied, or it was whitespace only
    #[error("no HTML fragment provided")]
    EmptyInput,

    /// The fragment sanitized down to zero element nodes
    #[error("no element found in the HTML fragment")]
    NoElementFound,

    /// A CSS selector could not be parsed by the selector engine
    #[error("invalid CSS selector: {0}")]
    InvalidSelector(String),

    /// An XPath expression failed to compile or evaluate
    #[error("invalid XPath expression '{expression}': {reason}")]
    InvalidExpression { expression: String, reason: String },
}

impl LocatorError {
    /// Errors caused by what the caller handed in, as opposed to a candidate
    /// that failed while being checked.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            LocatorError::EmptyInput | LocatorError::NoElementFound | LocatorError::InvalidSelector(_)
        )
    }
}
