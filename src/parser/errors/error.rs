//! Syntax error type

use text_size::TextRange;
use thiserror::Error;

use super::codes::ErrorCode;

/// A syntax error with location, code and message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
    pub code: ErrorCode,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            range,
            code,
        }
    }

    /// Format the error with its code, `E0201: expected `end``
    pub fn format(&self) -> String {
        format!("{}: {}", self.code, self.message)
    }
}
