//! Regex compilation for static patterns.

use regex::Regex;

/// Helper function to safely compile a regex pattern, panicking with a detailed error message
/// if compilation fails. Used for static regex patterns that are compile-time constants.
pub fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}
