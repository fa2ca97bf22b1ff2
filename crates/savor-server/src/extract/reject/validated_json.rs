//! Validated JSON extractor.
//!
//! This module provides [`ValidateJson`], a JSON extractor that runs the
//! `validator` rules of the target type before the handler sees it.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

/// Tracing target for request validation.
const TRACING_TARGET: &str = "savor_server::extract::validate";

/// JSON extractor with automatic validation using the `validator` crate.
///
/// Deserialization failures behave like [`Json`]. Validation failures become
/// `400 Bad Request` with every failing rule joined into one message.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Creates a new instance of [`ValidateJson`].
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self::new(data))
    }
}

/// Formats length validation errors.
fn format_length_error(
    field: &str,
    params: &HashMap<Cow<'static, str>, serde_json::Value>,
) -> String {
    let number = |key: &str| params.get(key).and_then(serde_json::Value::as_u64);

    match (number("min"), number("max")) {
        (Some(min), Some(max)) => {
            format!("{field} must be between {min} and {max} characters long")
        }
        (Some(min), None) => format!("{field} must be at least {min} characters long"),
        (None, Some(max)) => format!("{field} must be at most {max} characters long"),
        (None, None) => format!("{field} has invalid length"),
    }
}

/// Formats range validation errors.
fn format_range_error(
    field: &str,
    params: &HashMap<Cow<'static, str>, serde_json::Value>,
) -> String {
    let number = |key: &str| params.get(key).and_then(serde_json::Value::as_f64);

    match (number("min"), number("max")) {
        (Some(min), Some(max)) => format!("{field} must be between {min} and {max}"),
        (Some(min), None) => format!("{field} must be at least {min}"),
        (None, Some(max)) => format!("{field} must be at most {max}"),
        (None, None) => format!("{field} is out of valid range"),
    }
}

/// Formats one validation error as a user-facing sentence.
fn format_validation_error(field: &str, error: &validator::ValidationError) -> String {
    if let Some(custom_message) = &error.message {
        return custom_message.to_string();
    }

    match error.code.as_ref() {
        "required" => format!("{field} is required"),
        "length" => format_length_error(field, &error.params),
        "email" => format!("{field} must be a valid email address"),
        "range" => format_range_error(field, &error.params),
        "url" => format!("{field} must be a valid URL"),
        code => format!("{field} failed validation: {code}"),
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let mut error_messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(move |error| format_validation_error(field, error))
            })
            .collect();
        error_messages.sort();

        let user_message = match error_messages.as_slice() {
            [] => "Validation failed".to_owned(),
            [single_error] => single_error.clone(),
            multiple => multiple.join(". "),
        };

        tracing::warn!(
            target: TRACING_TARGET,
            errors = ?errors.field_errors(),
            "Request validation failed"
        );

        ErrorKind::BadRequest.with_message(user_message)
    }
}

impl<T> aide::OperationInput for ValidateJson<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        <Json<T> as aide::OperationInput>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        <Json<T> as aide::OperationInput>::inferred_early_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use validator::ValidationError;

    use super::*;

    #[test]
    fn custom_message_wins() {
        let error = ValidationError::new("email").with_message(Cow::Borrowed("Email is invalid"));
        assert_eq!(format_validation_error("email", &error), "Email is invalid");
    }

    #[test]
    fn length_message_names_bounds() {
        let mut error = ValidationError::new("length");
        error.add_param(Cow::Borrowed("min"), &8);
        error.add_param(Cow::Borrowed("max"), &128);
        assert_eq!(
            format_validation_error("password", &error),
            "password must be between 8 and 128 characters long"
        );
    }

    #[test]
    fn validation_errors_become_bad_request() {
        let mut errors = ValidationErrors::new();
        errors.add("email", ValidationError::new("email"));

        let error = Error::from(errors);
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.message(), Some("email must be a valid email address"));
    }
}
