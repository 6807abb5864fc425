//! Vendor signature detection.

use crate::config::{VENDOR_CONTEXT_AFTER, VENDOR_CONTEXT_BEFORE};
use crate::document::PageDocument;
use crate::platform::PlatformCatalog;
use crate::utils::context_window;

use super::placement::Location;

/// The first vendor pattern that matched the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorHit {
    /// Literal source of the matching pattern
    pub match_fragment: String,
    /// Text the pattern matched, lowercased
    pub matched_text: String,
    /// Lowercased page text around the match start
    pub context: String,
    /// Best guess at where the signature lives
    pub location: Location,
}

/// Runs the platform's vendor patterns, in order, over the lowercased page.
pub fn detect_vendor(document: &PageDocument, catalog: &PlatformCatalog) -> Option<VendorHit> {
    let text = document.raw().to_lowercase();

    catalog.vendor_patterns.iter().find_map(|pattern| {
        let found = pattern.find(&text)?;
        let context = context_window(
            &text,
            found.start(),
            found.start(),
            VENDOR_CONTEXT_BEFORE,
            VENDOR_CONTEXT_AFTER,
        );
        Some(VendorHit {
            match_fragment: pattern.as_str().to_string(),
            matched_text: found.as_str().to_string(),
            context: context.to_string(),
            location: guess_location(document, pattern.as_str()),
        })
    })
}

/// Looks for the pattern's literal source in the head, then the body.
///
/// Patterns with regex syntax (`fbq\s*\(`) rarely appear verbatim, so most
/// vendor hits are reported as unclear.
fn guess_location(document: &PageDocument, fragment: &str) -> Location {
    if document.head().contains(fragment) {
        Location::Head
    } else if document.body().contains(fragment) {
        Location::Body
    } else {
        Location::Unclear
    }
}
