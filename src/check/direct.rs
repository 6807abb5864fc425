//! Direct-HTML checks: the pixel is expected in the page markup.

use crate::detection::{
    apply_event_name_override, classify, dedup_issues, detect_external, detect_vendor,
    extract_matched_code, match_snippet, page_code_issues, snippet_issues, troubleshooting,
    validate_event_snippet, validate_pixel_id, PlacementAssessment, EVENT_SNIPPET_MISSING,
    MATCHED_CODE_UNAVAILABLE,
};
use crate::diagnostics::{DiagnosticEvent, DiagnosticSink};
use crate::document::PageDocument;
use crate::models::{CheckMethod, DetectionRequest, DetectionStrategy, Placement, Verdict, VerdictStatus};
use crate::normalize::normalize_strict;
use crate::platform::catalog_for;
use crate::utils::preview;

pub const SNIPPET_NOT_FOUND_SUMMARY: &str = "Pixel snippet not found on the page";
pub const SNIPPET_NOT_FOUND_TROUBLESHOOTING: &str = "The provided pixel snippet was not found anywhere on the page. Please verify the snippet is correct and has been properly implemented.";

const VENDOR_SUMMARY: &str = "Pixel detected by vendor signature (fuzzy match)";
const EXTERNAL_SUMMARY: &str = "Pixel detected via external script loading";

/// Checks a parsed page against a direct-HTML request.
///
/// Pure: the same document and request always produce the same verdict.
pub fn check_html(document: &PageDocument, request: &DetectionRequest, sink: &dyn DiagnosticSink) -> Verdict {
    let html = document.raw();
    let snippet = request.snippet().unwrap_or_default();
    let tier = match_snippet(html, snippet);
    sink.record(&DiagnosticEvent::SnippetMatch {
        snippet_length: snippet.chars().count(),
        tier,
    });

    match tier {
        Some(tier) => assess_snippet_hit(document, request, snippet, tier),
        None => fallback_detection(document, request, sink),
    }
}

/// Vendor signature, then external script. A URL trigger expectation cannot
/// be satisfied without the snippet itself, so it skips straight to failure.
fn fallback_detection(document: &PageDocument, request: &DetectionRequest, sink: &dyn DiagnosticSink) -> Verdict {
    let not_found = || {
        Verdict::not_found(
            SNIPPET_NOT_FOUND_SUMMARY,
            SNIPPET_NOT_FOUND_TROUBLESHOOTING,
            CheckMethod::Static,
        )
    };
    if request.placement == Placement::UrlTrigger {
        return not_found();
    }

    let catalog = catalog_for(&request.platform);
    if let Some(hit) = detect_vendor(document, catalog) {
        record_hit(sink, DetectionStrategy::VendorSignature, &hit.context);
        return Verdict::detected(
            VENDOR_SUMMARY,
            hit.location.label(),
            hit.context,
            CheckMethod::Static,
            DetectionStrategy::VendorSignature,
        );
    }
    if let Some(hit) = detect_external(document, catalog) {
        let context = hit.context();
        record_hit(sink, DetectionStrategy::ExternalScript, &context);
        return Verdict::detected(
            EXTERNAL_SUMMARY,
            hit.placement_label(),
            context,
            CheckMethod::Static,
            DetectionStrategy::ExternalScript,
        );
    }
    not_found()
}

pub(crate) fn record_hit(sink: &dyn DiagnosticSink, strategy: DetectionStrategy, context: &str) {
    sink.record(&DiagnosticEvent::StrategyHit {
        strategy,
        context_preview: preview(context, 80).to_string(),
    });
}

fn assess_snippet_hit(
    document: &PageDocument,
    request: &DetectionRequest,
    snippet: &str,
    tier: DetectionStrategy,
) -> Verdict {
    let html = document.raw();
    let catalog = catalog_for(&request.platform);
    let event_name = request.event_name();

    let location = classify(document, snippet, tier);
    let mut placement =
        PlacementAssessment::assess(location, request.placement, &request.url, request.trigger_contains());

    let normalized_snippet = normalize_strict(snippet);
    let mut issues = snippet_issues(&normalized_snippet, &request.platform, catalog, event_name);

    let matched_code = extract_matched_code(document, snippet);
    if let Some(code) = &matched_code {
        issues.extend(page_code_issues(code, event_name));
    }
    apply_event_name_override(&mut issues, html, event_name);

    let pixel_id_outcome = (!request.pixel_id().is_empty())
        .then(|| validate_pixel_id(html, catalog, request.pixel_id()));
    if let Some(outcome) = &pixel_id_outcome {
        if outcome.mismatch {
            issues.push(format!(
                "Pixel ID mismatch: Expected {}, found {}",
                outcome.expected_id,
                outcome.found_id.as_deref().unwrap_or_default()
            ));
        }
        if outcome.found && outcome.is_match {
            placement.rescue_with_pixel_id();
        }
    }

    let event_snippet_outcome = request
        .event_snippet()
        .map(|event_snippet| validate_event_snippet(html, event_snippet, catalog));
    if event_snippet_outcome.as_ref().is_some_and(|o| !o.found) {
        issues.push(EVENT_SNIPPET_MISSING.to_string());
    }

    let issues = dedup_issues(issues);
    let troubleshooting = troubleshooting(&placement, request.placement, &issues, catalog);

    let status = if placement.correct && issues.is_empty() {
        VerdictStatus::Pass
    } else {
        VerdictStatus::Fail
    };
    let summary = match (status, issues.first()) {
        (VerdictStatus::Pass, _) => "Pixel is correctly placed and configured".to_string(),
        (_, Some(first)) => format!("Pixel found but issues detected: {first}"),
        (_, None) => "Pixel placement or configuration needs attention".to_string(),
    };

    Verdict {
        status,
        summary,
        detected_placement: placement.label,
        matched_code: Some(matched_code.unwrap_or_else(|| MATCHED_CODE_UNAVAILABLE.to_string())),
        troubleshooting,
        issues,
        pixel_id_outcome,
        event_snippet_outcome,
        method: CheckMethod::Static,
        strategy: Some(tier),
    }
}
