//! Check orchestration.
//!
//! `PixelChecker` fetches the page (refetching it with the desktop-browser
//! profile for tag-manager checks), runs detection on a blocking thread and
//! turns every failure into a `Verdict`. Detection itself (`check_page`) is synchronous and pure.

mod direct;
mod tag_manager;

use std::sync::Arc;

use log::{error, info};

use crate::config::HeaderProfile;
use crate::diagnostics::{scan_platform, DiagnosticEvent, DiagnosticSink, LogSink};
use crate::document::PageDocument;
use crate::error_handling::{sanitize_error_detail, CheckError};
use crate::fetch::{FetchedPage, PageFetcher};
use crate::models::{CheckMethod, DetectionRequest, PlacementMethod, Verdict};
use crate::platform::catalog_for;

pub use direct::{check_html, SNIPPET_NOT_FOUND_SUMMARY, SNIPPET_NOT_FOUND_TROUBLESHOOTING};
pub use tag_manager::{evaluate_page, fetch_failed, TAG_MANAGER_NOT_FOUND_SUMMARY, TAG_MANAGER_PLACEMENT_LABEL};

/// Summary of a verdict produced by an unexpected internal failure.
pub const GENERIC_ERROR_SUMMARY: &str = "An error occurred while checking the pixel";

/// Runs detection on already-fetched HTML.
///
/// Emits a platform scan, then dispatches on the request's placement
/// method. `method` is only used for tag-manager requests; direct-HTML
/// verdicts are always `static`.
pub fn check_page(html: &str, request: &DetectionRequest, method: CheckMethod, sink: &dyn DiagnosticSink) -> Verdict {
    let document = PageDocument::parse(html);
    let catalog = catalog_for(&request.platform);
    sink.record(&scan_platform(&document, &request.platform, catalog, request.pixel_id()));

    match request.placement_method {
        PlacementMethod::DirectHtml => check_html(&document, request, sink),
        PlacementMethod::TagManager => evaluate_page(&document, request, method, sink),
    }
}

/// Checks pixels on live pages.
pub struct PixelChecker<F> {
    fetcher: F,
    sink: Arc<dyn DiagnosticSink>,
}

impl<F: PageFetcher> PixelChecker<F> {
    /// A checker whose diagnostics go to the log.
    pub fn new(fetcher: F) -> Self {
        Self::with_sink(fetcher, Arc::new(LogSink))
    }

    pub fn with_sink(fetcher: F, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { fetcher, sink }
    }

    /// Checks one request. Never fails: fetch errors and internal failures
    /// come back as `error` verdicts.
    ///
    /// The request is expected to have passed `DetectionRequest::validate`.
    pub async fn check(&self, request: &DetectionRequest) -> Verdict {
        let method = match request.placement_method {
            PlacementMethod::DirectHtml => CheckMethod::Static,
            PlacementMethod::TagManager => CheckMethod::Browser,
        };
        info!(
            "Checking {} pixel on {} ({})",
            request.platform, request.url, request.placement_method
        );

        match self.run(request).await {
            Ok(verdict) => {
                info!("Check finished: {} ({})", verdict.status, verdict.summary);
                verdict
            }
            Err(CheckError::Fetch(e)) => {
                error!("Failed to fetch {}: {e}", request.url);
                Verdict::error(
                    format!("Failed to fetch website: {}", sanitize_error_detail(&e.to_string())),
                    method,
                )
            }
            Err(CheckError::Unexpected(e)) => {
                error!("Check of {} failed unexpectedly: {e:#}", request.url);
                Verdict::error(GENERIC_ERROR_SUMMARY, method)
            }
        }
    }

    /// Every check starts with a minimal-profile fetch; its failure is an
    /// `error` verdict in both modes. Tag-manager checks then refetch the
    /// page with the browser profile and discard the first response.
    async fn run(&self, request: &DetectionRequest) -> Result<Verdict, CheckError> {
        let page = self.fetcher.fetch(&request.url, HeaderProfile::Minimal).await?;
        let (page, method) = match request.placement_method {
            PlacementMethod::DirectHtml => (page, CheckMethod::Static),
            PlacementMethod::TagManager => match self.fetch_for_tag_manager(&request.url).await {
                Ok(fetched) => fetched,
                Err(verdict) => return Ok(*verdict),
            },
        };
        self.detect(page, request, method).await
    }

    /// Desktop-browser profile first, then one retry with the minimal profile.
    async fn fetch_for_tag_manager(&self, url: &str) -> Result<(FetchedPage, CheckMethod), Box<Verdict>> {
        let primary = match self.fetcher.fetch(url, HeaderProfile::DesktopBrowser).await {
            Ok(page) => return Ok((page, CheckMethod::Browser)),
            Err(e) => e,
        };
        self.sink.record(&DiagnosticEvent::FetchFallback {
            url: url.to_string(),
            error: primary.to_string(),
        });
        match self.fetcher.fetch(url, HeaderProfile::Minimal).await {
            Ok(page) => Ok((page, CheckMethod::BrowserFallback)),
            Err(fallback) => {
                error!("Both fetch profiles failed for {url}: {primary}; {fallback}");
                Err(Box::new(fetch_failed(&primary, &fallback)))
            }
        }
    }

    /// Parsing and regex work run on the blocking pool; a panic there
    /// surfaces as `CheckError::Unexpected`.
    async fn detect(&self, page: FetchedPage, request: &DetectionRequest, method: CheckMethod) -> Result<Verdict, CheckError> {
        let request = request.clone();
        let sink = Arc::clone(&self.sink);
        let handle = tokio::task::spawn_blocking(move || check_page(&page.html, &request, method, sink.as_ref()));
        handle
            .await
            .map_err(|e| CheckError::Unexpected(anyhow::anyhow!("Detection task join error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;
    use crate::models::{DetectionStrategy, Placement};

    const PAGE: &str = "<html><head><script>fbq('init', '123'); fbq('track', 'PageView');</script></head><body></body></html>";

    #[test]
    fn test_check_page_is_idempotent() {
        let request = DetectionRequest::new("https://example.com/", "Facebook", "123")
            .with_placement(Placement::Head)
            .with_snippet("fbq('init', '123');");
        let first = check_page(PAGE, &request, CheckMethod::Static, &crate::diagnostics::NoopSink);
        let second = check_page(PAGE, &request, CheckMethod::Static, &crate::diagnostics::NoopSink);
        assert_eq!(first, second);
        assert!(first.is_pass());
    }

    #[test]
    fn test_check_page_emits_scan_then_match() {
        let sink = RecordingSink::new();
        let request = DetectionRequest::new("https://example.com/", "Facebook", "123")
            .with_snippet("fbq('init', '123');");
        check_page(PAGE, &request, CheckMethod::Static, &sink);

        let events = sink.events();
        assert!(matches!(events[0], DiagnosticEvent::PlatformScan { .. }));
        assert!(matches!(
            events[1],
            DiagnosticEvent::SnippetMatch {
                tier: Some(DetectionStrategy::Exact),
                ..
            }
        ));
    }

    #[test]
    fn test_check_page_dispatches_tag_manager() {
        let request = DetectionRequest::new("https://example.com/", "Facebook", "123")
            .with_method(PlacementMethod::TagManager);
        let verdict = check_page(PAGE, &request, CheckMethod::BrowserFallback, &crate::diagnostics::NoopSink);
        assert!(verdict.is_pass());
        assert_eq!(verdict.method, CheckMethod::BrowserFallback);
        assert_eq!(verdict.detected_placement, TAG_MANAGER_PLACEMENT_LABEL);
    }
}
