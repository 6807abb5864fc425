//! Error handling.
//!
//! This module provides:
//! - Error type definitions for initialization, fetching, validation and checks
//! - Sanitization of error details before they are copied into a verdict

mod types;

// Re-export public API
pub use types::{CheckError, FetchError, InitializationError, RequestError};

/// Sanitizes and truncates an error detail for inclusion in a verdict.
///
/// Control characters (other than newline and tab) are removed and the
/// message is capped at `MAX_ERROR_MESSAGE_LENGTH` characters.
pub fn sanitize_error_detail(message: &str) -> String {
    let sanitized: String = message
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();

    let limit = crate::config::MAX_ERROR_MESSAGE_LENGTH;
    let char_count = sanitized.chars().count();
    if char_count > limit {
        let truncated: String = sanitized.chars().take(limit).collect();
        format!("{truncated}... (truncated, original length: {char_count} chars)")
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_removes_control_chars() {
        let input = "Error\x00message\x01with\x02control";
        assert_eq!(sanitize_error_detail(input), "Errormessagewithcontrol");
    }

    #[test]
    fn test_sanitize_preserves_newlines_and_unicode() {
        let input = "line one\nline two 测试";
        assert_eq!(sanitize_error_detail(input), input);
    }

    #[test]
    fn test_sanitize_truncates_long_messages() {
        let input = "x".repeat(crate::config::MAX_ERROR_MESSAGE_LENGTH + 10);
        let output = sanitize_error_detail(&input);
        assert!(output.contains("truncated"));
        assert!(output.starts_with(&"x".repeat(crate::config::MAX_ERROR_MESSAGE_LENGTH)));
    }
}
