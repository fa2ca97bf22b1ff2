use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query as AxumQuery};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// Tracing target for query string extraction.
const TRACING_TARGET: &str = "savor_server::extract::query";

/// Query parameter extractor whose rejections are `400 {"error": "..."}`.
///
/// ```rust,no_run
/// use savor_server::extract::Query;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Listing {
///     limit: Option<u32>,
/// }
///
/// // Route: /reviews?limit=10
/// async fn list_reviews(Query(params): Query<Listing>) {
///     let _limit = params.limit.unwrap_or(100);
/// }
/// ```
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Query<T>(pub T);

impl<T> Query<T> {
    /// Creates a new [`Query`] wrapper around the provided query parameters.
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Consumes the wrapper and returns the inner query parameters.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AxumQuery::<T>::from_request_parts(parts, state).await {
            Ok(AxumQuery(query)) => Ok(Query(query)),
            Err(rejection) => Err(enhance_query_error(rejection)),
        }
    }
}

/// Converts a query rejection into a message naming the offending parameter.
fn enhance_query_error(rejection: QueryRejection) -> Error<'static> {
    tracing::debug!(
        target: TRACING_TARGET,
        error = %rejection,
        "Query parameter parsing failed"
    );

    match rejection {
        QueryRejection::FailedToDeserializeQueryString(err) => {
            let error_message = err.body_text();

            if error_message.contains("missing field") {
                let field_name = extract_field_name_from_error(&error_message).unwrap_or("unknown");
                ErrorKind::BadRequest
                    .with_message(format!("Missing required query parameter '{field_name}'"))
            } else if error_message.contains("invalid") {
                ErrorKind::BadRequest
                    .with_message("Invalid query parameter type")
                    .with_context(error_message)
            } else if error_message.contains("duplicate field") {
                let field_name = extract_field_name_from_error(&error_message).unwrap_or("unknown");
                ErrorKind::BadRequest
                    .with_message(format!("Duplicate query parameter '{field_name}'"))
            } else {
                ErrorKind::BadRequest
                    .with_message("Invalid query parameters")
                    .with_context(error_message)
            }
        }
        _ => ErrorKind::BadRequest.with_message("Invalid query parameters"),
    }
}

/// Best-effort extraction of a field name from a serde error message.
fn extract_field_name_from_error(error_message: &str) -> Option<&str> {
    if let Some(start) = error_message.find('`')
        && let Some(end) = error_message[start + 1..].find('`')
    {
        return Some(&error_message[start + 1..start + 1 + end]);
    }

    if let Some(start) = error_message.find("field ") {
        let field_part = &error_message[start + 6..];
        if let Some(end) = field_part.find(' ') {
            return Some(&field_part[..end]);
        }
    }

    None
}

impl<T> aide::OperationInput for Query<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        <AxumQuery<T> as aide::OperationInput>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        <AxumQuery<T> as aide::OperationInput>::inferred_early_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_name_from_serde_messages() {
        assert_eq!(
            extract_field_name_from_error("missing field `userId`"),
            Some("userId")
        );
        assert_eq!(
            extract_field_name_from_error("duplicate field limit at line 1"),
            Some("limit")
        );
        assert_eq!(extract_field_name_from_error("some other error"), None);
    }

    #[test]
    fn query_creation() {
        let query = Query::new("limit".to_string());
        assert_eq!(query.into_inner(), "limit");
    }
}
