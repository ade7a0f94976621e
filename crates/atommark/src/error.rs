use std::fmt;

/// Unified error type for the atommark crate.
#[derive(Debug, Clone)]
pub enum AnnotateError {
    /// A clipboard mechanism refused or failed the write.
    Clipboard(String),
    /// Internal error.
    Internal(String),
}

impl fmt::Display for AnnotateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotateError::Clipboard(msg) => write!(f, "clipboard error: {msg}"),
            AnnotateError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for AnnotateError {}

/// Result type alias using [`AnnotateError`].
pub type AnnotateResult<T> = Result<T, AnnotateError>;
