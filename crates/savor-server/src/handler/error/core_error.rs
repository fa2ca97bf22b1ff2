//! Domain error to HTTP error conversion.

use savor_core::ErrorKind as CoreErrorKind;

use crate::handler::{Error, ErrorKind};

/// Tracing target for domain error conversion.
const TRACING_TARGET: &str = "savor_server::handler::core_error";

impl From<savor_core::Error> for Error<'static> {
    fn from(error: savor_core::Error) -> Self {
        let kind = match error.kind() {
            CoreErrorKind::Validation => ErrorKind::BadRequest,
            CoreErrorKind::NotFound => ErrorKind::NotFound,
            CoreErrorKind::Conflict => ErrorKind::Conflict,
            CoreErrorKind::Unauthorized => ErrorKind::Unauthorized,
            CoreErrorKind::Storage => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    source = ?std::error::Error::source(&error),
                    "storage operation failed"
                );
                return ErrorKind::InternalServerError.into_error();
            }
        };

        kind.with_message(error.message().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_keep_their_message() {
        let error: Error = savor_core::Error::validation("text is required").into();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.message(), Some("text is required"));

        let error: Error = savor_core::Error::not_found("Comment not found").into();
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.message(), Some("Comment not found"));

        let error: Error = savor_core::Error::conflict("already saved").into();
        assert_eq!(error.kind(), ErrorKind::Conflict);

        let error: Error = savor_core::Error::unauthorized("Invalid credentials").into();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn storage_errors_are_not_leaked() {
        let error: Error = savor_core::Error::storage("connection refused: 10.0.0.4:5432").into();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.message(), None);
    }
}
