//! Tiered snippet matching and matched-code extraction.

use crate::config::MATCHED_CODE_CONTEXT;
use crate::document::PageDocument;
use crate::models::DetectionStrategy;
use crate::normalize::{canonicalize_quotes, collapse_whitespace, normalize_loose, normalize_strict};
use crate::utils::context_window;

/// Shown in place of matched code when the snippet is not inside any script.
pub const MATCHED_CODE_UNAVAILABLE: &str = "Code snippet found but could not extract context";

/// Looks for `snippet` in `html`: strict containment first, then loose.
///
/// Returns the tier that matched. An empty or whitespace-only snippet never
/// matches, whatever the page contains.
pub fn match_snippet(html: &str, snippet: &str) -> Option<DetectionStrategy> {
    let strict_snippet = normalize_strict(snippet);
    if strict_snippet.is_empty() {
        return None;
    }
    if normalize_strict(html).contains(&strict_snippet) {
        return Some(DetectionStrategy::Exact);
    }

    let loose_snippet = normalize_loose(snippet);
    if !loose_snippet.is_empty() && normalize_loose(html).contains(&loose_snippet) {
        return Some(DetectionStrategy::Fuzzy);
    }
    None
}

/// Code surrounding the snippet inside the first script that contains it.
///
/// The window is cut from the whitespace-collapsed script text, before quote
/// canonicalization, so typographic quotes on the page survive into the
/// result. Returns `None` when no script contains the strict-normalized snippet.
pub fn extract_matched_code(document: &PageDocument, snippet: &str) -> Option<String> {
    let needle = normalize_strict(snippet);
    if needle.is_empty() {
        return None;
    }

    document.scripts().iter().find_map(|script| {
        let collapsed = collapse_whitespace(&script.content);
        let canonical = canonicalize_quotes(&collapsed);
        let byte_index = canonical.find(&needle)?;

        // Quote canonicalization is char-for-char, so char offsets carry over.
        let start_char = canonical[..byte_index].chars().count();
        let end_char = start_char + needle.chars().count();
        let start = char_to_byte(&collapsed, start_char);
        let end = char_to_byte(&collapsed, end_char);

        Some(
            context_window(
                &collapsed,
                start,
                end,
                MATCHED_CODE_CONTEXT,
                MATCHED_CODE_CONTEXT,
            )
            .to_string(),
        )
    })
}

fn char_to_byte(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map_or(s.len(), |(byte, _)| byte)
}
