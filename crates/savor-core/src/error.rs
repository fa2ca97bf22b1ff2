//! Domain error type shared by every storage backend and the HTTP layer.

use std::borrow::Cow;
use std::fmt;

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with the domain [`Error`] type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors surfaced by domain operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// A required field is missing, empty, or out of range.
    Validation,
    /// The referenced comment, parent, or record does not exist.
    NotFound,
    /// The write collides with an existing record.
    Conflict,
    /// Credentials were rejected.
    Unauthorized,
    /// The storage backend failed or is unreachable.
    Storage,
}

impl ErrorKind {
    /// Creates an [`Error`] of this kind with the given message.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'static, str>>) -> Error {
        Error::new(self, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// A structured error for domain and storage operations.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
#[must_use = "errors do nothing unless handled"]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the underlying cause.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Creates a not-found error.
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns whether this error was caused by user input rather than the system.
    pub fn is_client_error(&self) -> bool {
        !matches!(self.kind, ErrorKind::Storage)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_error_creation() {
        let error = Error::validation("text must not be empty");
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.message(), "text must not be empty");
        assert_eq!(error.to_string(), "validation: text must not be empty");
        assert!(error.is_client_error());
    }

    #[test]
    fn test_error_source() {
        let io = std::io::Error::other("connection reset");
        let error = Error::storage("write failed").with_source(io);
        assert!(!error.is_client_error());
        assert_eq!(
            error.source().map(ToString::to_string).as_deref(),
            Some("connection reset")
        );
    }

    #[test]
    fn test_kind_names() {
        let kind: &'static str = ErrorKind::NotFound.into();
        assert_eq!(kind, "not_found");
        assert_eq!(ErrorKind::Storage.as_ref(), "storage");
        assert_eq!(ErrorKind::Validation.to_string(), "validation");
    }
}
