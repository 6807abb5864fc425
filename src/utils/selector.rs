//! CSS selector parsing.

use scraper::Selector;

/// Parses a CSS selector that must succeed.
///
/// Meant for the fixed selectors held in statics; a failure is a programming
/// error, so this panics with the selector and the caller's context.
pub fn parse_selector_unsafe(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        panic!(
            "Failed to parse CSS selector '{}' in {}: {}. This is a programming error.",
            selector_str, context, e
        )
    })
}
