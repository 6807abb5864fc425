//! Diagnostic events emitted while a check runs.
//!
//! Detection code never logs its intermediate findings directly. It reports
//! them to a `DiagnosticSink`, so the CLI can write them to the log while
//! tests assert on them (or ignore them) without depending on log output.

use std::sync::Mutex;

use crate::document::PageDocument;
use crate::models::DetectionStrategy;
use crate::platform::PlatformCatalog;

/// Log target used by `LogSink`.
pub const DIAGNOSTICS_TARGET: &str = "pixel_check::diagnostics";

/// One observation made during a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// What the page looks like for the requested platform, before detection.
    PlatformScan {
        platform: String,
        html_length: usize,
        script_count: usize,
        markers: Vec<(&'static str, bool)>,
        pixel_id_present: bool,
    },
    /// Outcome of the snippet matcher (`None` when no tier matched).
    SnippetMatch {
        snippet_length: usize,
        tier: Option<DetectionStrategy>,
    },
    /// A fallback or tag-manager strategy produced the authoritative hit.
    StrategyHit {
        strategy: DetectionStrategy,
        context_preview: String,
    },
    /// The desktop-browser fetch failed and the minimal profile is being tried.
    FetchFallback { url: String, error: String },
}

/// Receives diagnostic events.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, event: &DiagnosticEvent);
}

/// Writes events as `key=value` debug lines under `DIAGNOSTICS_TARGET`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&self, event: &DiagnosticEvent) {
        match event {
            DiagnosticEvent::PlatformScan {
                platform,
                html_length,
                script_count,
                markers,
                pixel_id_present,
            } => {
                let markers = markers
                    .iter()
                    .map(|(marker, present)| format!("{marker}:{present}"))
                    .collect::<Vec<_>>()
                    .join(",");
                log::debug!(
                    target: DIAGNOSTICS_TARGET,
                    "event=platform_scan platform={platform:?} html_length={html_length} scripts={script_count} pixel_id_present={pixel_id_present} markers=[{markers}]"
                );
            }
            DiagnosticEvent::SnippetMatch {
                snippet_length,
                tier,
            } => {
                let tier = tier.map_or_else(|| "none".to_string(), |t| t.to_string());
                log::debug!(
                    target: DIAGNOSTICS_TARGET,
                    "event=snippet_match snippet_length={snippet_length} tier={tier}"
                );
            }
            DiagnosticEvent::StrategyHit {
                strategy,
                context_preview,
            } => {
                log::debug!(
                    target: DIAGNOSTICS_TARGET,
                    "event=strategy_hit strategy={strategy} context={context_preview:?}"
                );
            }
            DiagnosticEvent::FetchFallback { url, error } => {
                log::warn!(
                    target: DIAGNOSTICS_TARGET,
                    "event=fetch_fallback url={url} error={error:?}"
                );
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn record(&self, _event: &DiagnosticEvent) {}
}

/// Keeps every event in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the events recorded so far.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, event: &DiagnosticEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Builds the platform scan event for a fetched page.
///
/// Markers and the expected ID are searched case-insensitively in the raw HTML.
pub fn scan_platform(
    document: &PageDocument,
    platform: &str,
    catalog: &PlatformCatalog,
    pixel_id: &str,
) -> DiagnosticEvent {
    let lower = document.raw().to_lowercase();
    let markers = catalog
        .page_markers
        .iter()
        .map(|marker| (*marker, lower.contains(marker)))
        .collect();
    DiagnosticEvent::PlatformScan {
        platform: platform.to_string(),
        html_length: document.raw().len(),
        script_count: document.scripts().len(),
        markers,
        pixel_id_present: !pixel_id.is_empty() && lower.contains(&pixel_id.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;

    #[test]
    fn test_scan_reports_markers_and_id() {
        let document = PageDocument::parse(
            r#"<head><script src="https://connect.facebook.net/en_US/fbevents.js"></script></head>
               <body><script>FBQ('init', '987');</script></body>"#,
        );
        let event = scan_platform(
            &document,
            "Facebook",
            Platform::Facebook.catalog(),
            "987",
        );
        match event {
            DiagnosticEvent::PlatformScan {
                markers,
                pixel_id_present,
                script_count,
                ..
            } => {
                assert!(pixel_id_present);
                assert_eq!(script_count, 2);
                assert!(markers.contains(&("fbq", true)));
                assert!(markers.contains(&("connect.facebook.net", true)));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_scan_with_unknown_platform_has_no_markers() {
        let document = PageDocument::parse("<p>hi</p>");
        let event = scan_platform(&document, "MySpace", crate::platform::catalog_for("MySpace"), "");
        assert!(matches!(
            event,
            DiagnosticEvent::PlatformScan { ref markers, pixel_id_present: false, .. } if markers.is_empty()
        ));
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.record(&DiagnosticEvent::SnippetMatch {
            snippet_length: 3,
            tier: None,
        });
        sink.record(&DiagnosticEvent::SnippetMatch {
            snippet_length: 3,
            tier: Some(DetectionStrategy::Exact),
        });
        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[1],
            DiagnosticEvent::SnippetMatch {
                tier: Some(DetectionStrategy::Exact),
                ..
            }
        ));
    }

    #[test]
    fn test_log_and_noop_sinks_accept_every_event() {
        let event = DiagnosticEvent::FetchFallback {
            url: "https://example.com".into(),
            error: "403 Forbidden".into(),
        };
        LogSink.record(&event);
        NoopSink.record(&event);
    }
}
