//! Tag-manager checks: the pixel is injected by a tag manager, so there is no
//! literal snippet to look for. The page is refetched with a desktop-browser
//! profile and searched for the pixel ID, a vendor signature, then a loader.

use crate::detection::{detect_external, detect_vendor, validate_pixel_id};
use crate::diagnostics::DiagnosticSink;
use crate::document::PageDocument;
use crate::error_handling::{sanitize_error_detail, FetchError};
use crate::models::{CheckMethod, DetectionRequest, DetectionStrategy, Verdict};
use crate::platform::catalog_for;

use super::direct::record_hit;

/// Placement label for hits made in tag-manager mode.
pub const TAG_MANAGER_PLACEMENT_LABEL: &str = "Found via GTM/browser detection";

pub const TAG_MANAGER_NOT_FOUND_SUMMARY: &str = "Pixel not found via browser automation (GTM)";
const TAG_MANAGER_NOT_FOUND_TROUBLESHOOTING: &str = "The pixel was not found using browser automation. Please verify the GTM implementation is correct and the pixel is firing.";

/// Searches a freshly fetched page, first success wins.
///
/// `method` records which header profile produced the page.
pub fn evaluate_page(
    document: &PageDocument,
    request: &DetectionRequest,
    method: CheckMethod,
    sink: &dyn DiagnosticSink,
) -> Verdict {
    let catalog = catalog_for(&request.platform);
    let pixel_id = validate_pixel_id(document.raw(), catalog, request.pixel_id());

    let mut verdict = if pixel_id.found && pixel_id.is_match {
        let context = pixel_id.context.clone().unwrap_or_default();
        record_hit(sink, DetectionStrategy::PixelIdSearch, &context);
        Verdict::detected(
            "Pixel detected via browser automation (GTM)",
            TAG_MANAGER_PLACEMENT_LABEL,
            context,
            method,
            DetectionStrategy::PixelIdSearch,
        )
    } else if let Some(hit) = detect_vendor(document, catalog) {
        record_hit(sink, DetectionStrategy::VendorSignature, &hit.context);
        Verdict::detected(
            "Pixel detected via browser automation (vendor pattern)",
            TAG_MANAGER_PLACEMENT_LABEL,
            hit.context,
            method,
            DetectionStrategy::VendorSignature,
        )
    } else if let Some(hit) = detect_external(document, catalog) {
        let context = hit.context();
        record_hit(sink, DetectionStrategy::ExternalScript, &context);
        Verdict::detected(
            "Pixel detected via browser automation (external script)",
            hit.placement_label(),
            context,
            method,
            DetectionStrategy::ExternalScript,
        )
    } else {
        Verdict::not_found(
            TAG_MANAGER_NOT_FOUND_SUMMARY,
            TAG_MANAGER_NOT_FOUND_TROUBLESHOOTING,
            method,
        )
    };

    verdict.pixel_id_outcome = Some(pixel_id);
    verdict
}

/// Verdict for when both the browser-profile fetch and its fallback failed.
pub fn fetch_failed(primary: &FetchError, fallback: &FetchError) -> Verdict {
    let details = sanitize_error_detail(&format!(
        "Enhanced fetch failed: {primary}. Fallback also failed: {fallback}"
    ));
    Verdict::not_found(
        format!("Browser automation failed: {details}"),
        format!("Browser automation error: {details}"),
        CheckMethod::Browser,
    )
}
