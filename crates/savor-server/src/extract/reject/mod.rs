//! Drop-in replacements for the axum extractors whose rejections are
//! converted into [`handler::Error`].
//!
//! [`handler::Error`]: crate::handler::Error

pub mod enhanced_json;
pub mod enhanced_path;
pub mod enhanced_query;
pub mod validated_json;

pub use self::enhanced_json::Json;
pub use self::enhanced_path::Path;
pub use self::enhanced_query::Query;
pub use self::validated_json::ValidateJson;

/// Keeps the first lines of an error message and caps its length.
pub(crate) fn sanitize_error_message(message: &str, max_lines: usize, max_chars: usize) -> String {
    message
        .lines()
        .take(max_lines)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max_chars)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_leading_lines_and_caps_length() {
        let message = "first\nsecond\nthird\nfourth";
        assert_eq!(sanitize_error_message(message, 2, 200), "first second");

        let long = "x".repeat(500);
        assert_eq!(sanitize_error_message(&long, 3, 200).len(), 200);
    }
}
