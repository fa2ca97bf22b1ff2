//! Normalization and length rules for user-supplied text.

use crate::{Error, Result};

/// Maximum length of a display name, in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// Maximum length of comment and reply text, in characters.
pub const MAX_TEXT_CHARS: usize = 2000;

/// Maximum length of a parent identifier, in characters.
pub const MAX_PARENT_ID_CHARS: usize = 128;

/// Maximum length of a review body, in characters.
pub const MAX_REVIEW_BODY_CHARS: usize = 5000;

/// Minimum length of an account password, in characters.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Maximum length of an account password, in characters.
pub const MAX_PASSWORD_CHARS: usize = 128;

/// Trims `value` and checks that the result is non-empty and at most
/// `max_chars` characters long.
///
/// `field` is the client-facing field name used in the error message.
pub fn required(field: &'static str, value: &str, max_chars: usize) -> Result<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(Error::validation(format!("{field} is required")));
    }

    if trimmed.chars().count() > max_chars {
        return Err(Error::validation(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }

    Ok(trimmed.to_owned())
}

/// Like [`required`], but absent or blank values are accepted as `None`.
pub fn optional(
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => required(field, value, max_chars).map(Some),
    }
}
