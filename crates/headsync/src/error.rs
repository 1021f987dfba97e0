//! Error types for headsync

use std::fmt;
use thiserror::Error;

/// Identifier the head manager assigns to a registered entry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The head manager refused a push, patch or dispose
    Manager { operation: &'static str },
    /// The manager no longer holds the entry behind a handle
    EntryNotFound { id: EntryId },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manager { operation } => write!(f, "head manager failed to {operation}"),
            Self::EntryNotFound { id } => write!(f, "head entry {id} not found"),
        }
    }
}

/// Main error type for headsync
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }

    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Manager failure during `operation` ("push", "patch" or "dispose")
    pub fn manager(operation: &'static str, message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::Manager { operation }, message)
    }

    pub fn entry_not_found(id: EntryId) -> Self {
        Self::new(ErrorKind::EntryNotFound { id })
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message == self.kind.to_string() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

/// Result type alias for headsync
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id_display() {
        assert_eq!(EntryId(7).to_string(), "#7");
    }

    #[test]
    fn test_error_creation() {
        let err = Error::entry_not_found(EntryId(3));
        assert_eq!(err.kind(), &ErrorKind::EntryNotFound { id: EntryId(3) });
        assert_eq!(err.message(), "head entry #3 not found");
    }

    #[test]
    fn test_error_display() {
        let err = Error::manager("patch", "renderer detached");
        let display = err.to_string();
        assert!(display.contains("failed to patch"));
        assert!(display.contains("renderer detached"));

        let plain = Error::new(ErrorKind::EntryNotFound { id: EntryId(9) });
        assert_eq!(plain.to_string(), "head entry #9 not found");
    }
}
