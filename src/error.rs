//! Error taxonomy
//!
//! The engine is total: every action produces a valid next state, and
//! recoverable failures (invalid range, unsupported key, no-op action) are
//! coerced to no-ops rather than propagated. `TextBufferError` exists for
//! the handful of genuinely fallible boundary operations — external editor
//! I/O — and to give callers a typed way to name *why* a no-op happened.

use std::fmt;

/// Category of a text-buffer error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A `replace_range*` call with `start > end` or out-of-bounds rows/cols.
    InvalidRange,
    /// `handle_input` received a key with no entry in the default map.
    UnsupportedKey,
    /// The external editor could not be spawned, exited non-zero, or its
    /// temp file could not be read back.
    ExternalEditorFailure,
    /// An action that is defined as a no-op in its current state (undo on
    /// an empty stack, paste with an empty clipboard, backspace at the
    /// origin, ...).
    NoopAction,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange => write!(f, "InvalidRange"),
            Self::UnsupportedKey => write!(f, "UnsupportedKey"),
            Self::ExternalEditorFailure => write!(f, "ExternalEditorFailure"),
            Self::NoopAction => write!(f, "NoopAction"),
        }
    }
}

/// A structured error from the text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBufferError {
    pub kind: ErrorKind,
    pub message: String,
}

impl TextBufferError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn external_editor(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalEditorFailure, message)
    }
}

impl fmt::Display for TextBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for TextBufferError {}

impl From<std::io::Error> for TextBufferError {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::ExternalEditorFailure, err.to_string())
    }
}

impl From<String> for TextBufferError {
    fn from(message: String) -> Self {
        Self::new(ErrorKind::ExternalEditorFailure, message)
    }
}

impl From<&str> for TextBufferError {
    fn from(message: &str) -> Self {
        Self::new(ErrorKind::ExternalEditorFailure, message)
    }
}

/// Result alias for fallible text-buffer operations.
pub type Result<T> = std::result::Result<T, TextBufferError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
