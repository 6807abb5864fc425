//! Secondary event snippet validation.

use crate::models::EventSnippetOutcome;
use crate::normalize::normalize_strict;
use crate::platform::PlatformCatalog;

/// Checks that `event_snippet` appears in `html` after strict normalization.
///
/// Platforms with an event fallback pattern also accept the first match of
/// that pattern, reporting the matched text as the found event.
pub fn validate_event_snippet(
    html: &str,
    event_snippet: &str,
    catalog: &PlatformCatalog,
) -> EventSnippetOutcome {
    let normalized = normalize_strict(event_snippet);
    let found = !normalized.is_empty() && normalize_strict(html).contains(&normalized);

    if found {
        return EventSnippetOutcome {
            found: true,
            found_event: Some(normalized),
            expected_event: event_snippet.to_string(),
            is_match: true,
        };
    }

    if let Some(alternate) = catalog.event_fallback.as_ref().and_then(|p| p.find(html)) {
        return EventSnippetOutcome {
            found: true,
            found_event: Some(alternate.as_str().to_string()),
            expected_event: event_snippet.to_string(),
            is_match: true,
        };
    }

    EventSnippetOutcome {
        found: false,
        found_event: None,
        expected_event: event_snippet.to_string(),
        is_match: false,
    }
}
