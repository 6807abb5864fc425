//! Pixel detection and diagnosis.
//!
//! This module provides the detectors the checker sequences:
//! - Snippet matching (exact, then fuzzy) and matched-code extraction
//! - Vendor signature detection over the lowercased page
//! - External loader and inline call-token detection
//! - Pixel ID extraction and comparison
//! - Event snippet validation
//! - Placement classification and URL trigger evaluation
//! - Issue collection and troubleshooting text
//!
//! Every detector is a pure function of the page and the platform catalog.

mod event_snippet;
mod external;
mod issues;
mod pixel_id;
mod placement;
mod snippet;
mod vendor;

// Re-export public API
pub use event_snippet::validate_event_snippet;
pub use external::{detect_external, ExternalHit, INLINE_SCRIPT_LABEL};
pub use issues::{
    apply_event_name_override, dedup_issues, event_name_present, page_code_issues, snippet_issues,
    troubleshooting, EVENT_SNIPPET_MISSING, NO_ISSUES_DETECTED,
};
pub use pixel_id::validate_pixel_id;
pub use placement::{classify, Location, PlacementAssessment, TriggerEvaluation, PIXEL_ID_PLACEMENT_LABEL};
pub use snippet::{extract_matched_code, match_snippet, MATCHED_CODE_UNAVAILABLE};
pub use vendor::{detect_vendor, VendorHit};

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
