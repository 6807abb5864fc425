//! Pixel/account ID extraction and comparison.

use regex::{Captures, Regex};

use crate::config::PIXEL_ID_CONTEXT;
use crate::models::PixelIdOutcome;
use crate::platform::PlatformCatalog;
use crate::utils::context_window;

/// Looks for the platform's ID in `html` and compares it with `expected_id`.
///
/// Catalog patterns run first, in order; the first non-empty capture group of
/// the first matching pattern is the found ID and comparison is exact
/// (case-sensitive). When no pattern matches, the expected ID is searched as a
/// literal (optionally quoted, case-insensitive) anywhere in the page and
/// counts as a match when present. That fallback can hit an unrelated
/// occurrence of the same characters.
pub fn validate_pixel_id(html: &str, catalog: &PlatformCatalog, expected_id: &str) -> PixelIdOutcome {
    for pattern in &catalog.id_patterns {
        let Some(captures) = pattern.captures(html) else {
            continue;
        };
        let Some(found_id) = first_non_empty_group(&captures) else {
            continue;
        };
        let whole = captures.get(0).map_or(0..0, |m| m.range());
        let context = context_window(html, whole.start, whole.end, PIXEL_ID_CONTEXT, PIXEL_ID_CONTEXT);
        return PixelIdOutcome::found(found_id, expected_id, context.to_string());
    }

    literal_search(html, expected_id).unwrap_or_else(|| PixelIdOutcome::not_found(expected_id))
}

fn first_non_empty_group<'h>(captures: &Captures<'h>) -> Option<&'h str> {
    captures
        .iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str())
        .find(|s| !s.is_empty())
}

fn literal_search(html: &str, expected_id: &str) -> Option<PixelIdOutcome> {
    if expected_id.is_empty() {
        return None;
    }
    let pattern = format!(r#"(?i)["']?{}["']?"#, regex::escape(expected_id));
    let literal = match Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(e) => {
            log::warn!("Could not build literal ID search for {expected_id:?}: {e}");
            return None;
        }
    };
    let found = literal.find(html)?;
    let context = context_window(html, found.start(), found.end(), PIXEL_ID_CONTEXT, PIXEL_ID_CONTEXT);
    Some(PixelIdOutcome::found(expected_id, expected_id, context.to_string()))
}
