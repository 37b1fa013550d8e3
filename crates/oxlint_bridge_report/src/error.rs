//! Report error types.

use thiserror::Error;

/// Errors that can occur while translating a report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// A group did not match the layout its grammar expects.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The requested format cannot be translated from text.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl ReportError {
    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates an unsupported format error.
    pub fn unsupported_format(name: impl Into<String>) -> Self {
        Self::UnsupportedFormat(name.into())
    }
}
