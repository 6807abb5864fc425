//! Request and verdict types shared by the engine, the CLI and the HTTP endpoint.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::error_handling::RequestError;

/// Where the user expects the pixel to live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, ValueEnum, Serialize, Deserialize)]
pub enum Placement {
    /// Inside `<head>`
    #[strum(serialize = "Head")]
    #[serde(rename = "Head")]
    Head,
    /// Inside `<body>`
    #[strum(serialize = "Body")]
    #[serde(rename = "Body")]
    Body,
    /// Fired by a "page URL contains" trigger
    #[strum(serialize = "Trigger: Page URL contains")]
    #[serde(rename = "Trigger: Page URL contains")]
    UrlTrigger,
    /// No expectation; any location is accepted
    #[strum(serialize = "No specific placement")]
    #[serde(rename = "No specific placement")]
    Unspecified,
}

/// How the pixel was installed on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, ValueEnum, Serialize, Deserialize)]
pub enum PlacementMethod {
    /// Pasted into the page markup
    #[strum(serialize = "HTML Placement")]
    #[serde(rename = "HTML Placement")]
    DirectHtml,
    /// Injected by a tag manager
    #[strum(serialize = "GTM Placement")]
    #[serde(rename = "GTM Placement")]
    TagManager,
}

/// A validated detection request.
///
/// Optional text fields treat an empty string the same as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionRequest {
    pub url: String,
    pub platform: String,
    pub placement: Placement,
    pub placement_method: PlacementMethod,
    pub snippet: Option<String>,
    pub event_name: Option<String>,
    pub trigger_contains: Option<String>,
    pub pixel_id: String,
    pub event_snippet: Option<String>,
}

impl DetectionRequest {
    /// Creates a direct-HTML request with no expectation on placement.
    pub fn new(url: impl Into<String>, platform: impl Into<String>, pixel_id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            platform: platform.into(),
            placement: Placement::Unspecified,
            placement_method: PlacementMethod::DirectHtml,
            snippet: None,
            event_name: None,
            trigger_contains: None,
            pixel_id: pixel_id.into(),
            event_snippet: None,
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_method(mut self, method: PlacementMethod) -> Self {
        self.placement_method = method;
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    pub fn with_event_name(mut self, event_name: impl Into<String>) -> Self {
        self.event_name = Some(event_name.into());
        self
    }

    pub fn with_trigger(mut self, contains: impl Into<String>) -> Self {
        self.trigger_contains = Some(contains.into());
        self
    }

    pub fn with_event_snippet(mut self, event_snippet: impl Into<String>) -> Self {
        self.event_snippet = Some(event_snippet.into());
        self
    }

    /// The user-supplied snippet, if any. Whitespace-only snippets are returned
    /// as-is; the snippet matcher decides that they can never match.
    pub fn snippet(&self) -> Option<&str> {
        non_empty(self.snippet.as_deref())
    }

    /// The expected event name, trimmed, if any.
    pub fn event_name(&self) -> Option<&str> {
        non_empty(self.event_name.as_deref().map(str::trim))
    }

    /// The URL-trigger rule, trimmed, if any.
    pub fn trigger_contains(&self) -> Option<&str> {
        non_empty(self.trigger_contains.as_deref().map(str::trim))
    }

    /// The secondary event snippet, if any.
    pub fn event_snippet(&self) -> Option<&str> {
        non_empty(self.event_snippet.as_deref())
    }

    /// The expected pixel ID, trimmed.
    pub fn pixel_id(&self) -> &str {
        self.pixel_id.trim()
    }

    /// Checks the preconditions the engine relies on.
    ///
    /// The URL is normalized in place (`https://` is assumed when no scheme is
    /// given).
    ///
    /// # Errors
    ///
    /// Returns a `RequestError` describing the first violated precondition.
    pub fn validate(mut self) -> Result<Self, RequestError> {
        if self.platform.trim().is_empty() {
            return Err(RequestError::MissingField("platform"));
        }
        if self.pixel_id().is_empty() {
            return Err(RequestError::MissingField("pixelId"));
        }
        self.url = crate::app::validate_and_normalize_url(self.url.trim())
            .ok_or_else(|| RequestError::InvalidUrl(self.url.clone()))?;
        if self.placement == Placement::UrlTrigger && self.trigger_contains().is_none() {
            return Err(RequestError::MissingTrigger);
        }
        Ok(self)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Overall outcome of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VerdictStatus {
    Pass,
    Fail,
    Error,
}

/// Which fetch path produced the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CheckMethod {
    /// Direct-HTML check of the page as served to the tool
    Static,
    /// Tag-manager check with the desktop-browser profile
    Browser,
    /// Tag-manager check that fell back to the minimal profile
    BrowserFallback,
}

/// The detection strategy that produced the authoritative hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum DetectionStrategy {
    /// Strict-normalized containment of the user snippet
    Exact,
    /// Loose-normalized containment of the user snippet
    Fuzzy,
    /// Platform call signature or domain fragment
    VendorSignature,
    /// Platform loader script or inline call token
    ExternalScript,
    /// Platform ID pattern or literal ID search
    PixelIdSearch,
}

impl DetectionStrategy {
    /// Whether the strategy matched the user's literal snippet.
    pub fn is_snippet_match(self) -> bool {
        matches!(self, DetectionStrategy::Exact | DetectionStrategy::Fuzzy)
    }
}

/// Result of looking for the platform's account/pixel ID.
///
/// `mismatch` is `found && !match`; `found_id` and `context` are only present
/// when something was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelIdOutcome {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_id: Option<String>,
    pub expected_id: String,
    #[serde(rename = "match")]
    pub is_match: bool,
    pub mismatch: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl PixelIdOutcome {
    /// An outcome for an ID that was not found anywhere.
    pub fn not_found(expected_id: &str) -> Self {
        Self {
            found: false,
            found_id: None,
            expected_id: expected_id.to_string(),
            is_match: false,
            mismatch: false,
            context: None,
        }
    }

    /// An outcome for a found ID, compared exactly against the expected one.
    pub fn found(found_id: &str, expected_id: &str, context: String) -> Self {
        let is_match = found_id == expected_id;
        Self {
            found: true,
            found_id: Some(found_id.to_string()),
            expected_id: expected_id.to_string(),
            is_match,
            mismatch: !is_match,
            context: Some(context),
        }
    }
}

/// Result of looking for the secondary event snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSnippetOutcome {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_event: Option<String>,
    pub expected_event: String,
    #[serde(rename = "match")]
    pub is_match: bool,
}

/// Final result of a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub status: VerdictStatus,
    pub summary: String,
    pub detected_placement: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_code: Option<String>,
    pub troubleshooting: String,
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_id_outcome: Option<PixelIdOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_snippet_outcome: Option<EventSnippetOutcome>,
    pub method: CheckMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<DetectionStrategy>,
}

impl Verdict {
    /// A terminal error verdict carrying only a summary.
    pub fn error(summary: impl Into<String>, method: CheckMethod) -> Self {
        let summary = summary.into();
        Self {
            status: VerdictStatus::Error,
            troubleshooting: summary.clone(),
            summary,
            detected_placement: "Not checked".to_string(),
            matched_code: None,
            issues: Vec::new(),
            pixel_id_outcome: None,
            event_snippet_outcome: None,
            method,
            strategy: None,
        }
    }

    /// A pass produced by a fallback strategy (nothing further to diagnose).
    pub(crate) fn detected(
        summary: impl Into<String>,
        detected_placement: impl Into<String>,
        matched_code: String,
        method: CheckMethod,
        strategy: DetectionStrategy,
    ) -> Self {
        Self {
            status: VerdictStatus::Pass,
            summary: summary.into(),
            detected_placement: detected_placement.into(),
            matched_code: Some(matched_code),
            troubleshooting: crate::detection::NO_ISSUES_DETECTED.to_string(),
            issues: Vec::new(),
            pixel_id_outcome: None,
            event_snippet_outcome: None,
            method,
            strategy: Some(strategy),
        }
    }

    /// A terminal "not found" verdict.
    pub(crate) fn not_found(
        summary: impl Into<String>,
        troubleshooting: impl Into<String>,
        method: CheckMethod,
    ) -> Self {
        Self {
            status: VerdictStatus::Fail,
            summary: summary.into(),
            detected_placement: "Not found".to_string(),
            matched_code: None,
            troubleshooting: troubleshooting.into(),
            issues: Vec::new(),
            pixel_id_outcome: None,
            event_snippet_outcome: None,
            method,
            strategy: None,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.status == VerdictStatus::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> DetectionRequest {
        DetectionRequest::new("https://example.com/", "Facebook", "123")
    }

    #[test]
    fn test_placement_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&Placement::UrlTrigger).unwrap();
        assert_eq!(json, "\"Trigger: Page URL contains\"");
        let parsed: Placement = serde_json::from_str("\"No specific placement\"").unwrap();
        assert_eq!(parsed, Placement::Unspecified);
        assert_eq!(Placement::Head.to_string(), "Head");
    }

    #[test]
    fn test_empty_optional_fields_read_as_absent() {
        let request = base_request()
            .with_snippet("")
            .with_event_name("   ")
            .with_trigger("")
            .with_event_snippet("");
        assert_eq!(request.snippet(), None);
        assert_eq!(request.event_name(), None);
        assert_eq!(request.trigger_contains(), None);
        assert_eq!(request.event_snippet(), None);
    }

    #[test]
    fn test_whitespace_snippet_is_kept_for_the_matcher() {
        let request = base_request().with_snippet("   ");
        assert_eq!(request.snippet(), Some("   "));
    }

    #[test]
    fn test_validate_requires_trigger_for_url_trigger() {
        let request = base_request().with_placement(Placement::UrlTrigger);
        assert_eq!(request.validate(), Err(RequestError::MissingTrigger));

        let request = base_request()
            .with_placement(Placement::UrlTrigger)
            .with_trigger("checkout");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_normalizes_url() {
        let request = DetectionRequest::new("example.com/landing", "TikTok", "ABC")
            .validate()
            .unwrap();
        assert_eq!(request.url, "https://example.com/landing");
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let bad_url = DetectionRequest::new("not a url at all!!!", "TikTok", "ABC");
        assert!(matches!(bad_url.validate(), Err(RequestError::InvalidUrl(_))));

        let no_id = DetectionRequest::new("https://example.com", "TikTok", "  ");
        assert_eq!(no_id.validate(), Err(RequestError::MissingField("pixelId")));

        let no_platform = DetectionRequest::new("https://example.com", "", "ABC");
        assert_eq!(
            no_platform.validate(),
            Err(RequestError::MissingField("platform"))
        );
    }

    #[test]
    fn test_pixel_id_outcome_mismatch_invariant() {
        let matched = PixelIdOutcome::found("123", "123", String::new());
        assert!(matched.is_match && !matched.mismatch);

        let mismatched = PixelIdOutcome::found("123", "0123", String::new());
        assert!(!mismatched.is_match && mismatched.mismatch);

        let missing = PixelIdOutcome::not_found("123");
        assert!(!missing.found && !missing.mismatch);
        assert!(missing.found_id.is_none() && missing.context.is_none());
    }

    #[test]
    fn test_verdict_serializes_camel_case_and_skips_absent_fields() {
        let verdict = Verdict::not_found("Pixel snippet not found on the page", "x", CheckMethod::Static);
        let value = serde_json::to_value(&verdict).unwrap();
        assert_eq!(value["status"], "fail");
        assert_eq!(value["detectedPlacement"], "Not found");
        assert_eq!(value["method"], "static");
        assert!(value.get("matchedCode").is_none());
        assert!(value.get("pixelIdOutcome").is_none());
    }

    #[test]
    fn test_strategy_and_method_labels() {
        assert_eq!(DetectionStrategy::VendorSignature.to_string(), "vendorSignature");
        assert_eq!(CheckMethod::BrowserFallback.to_string(), "browser-fallback");
        assert_eq!(
            serde_json::to_string(&DetectionStrategy::PixelIdSearch).unwrap(),
            "\"pixelIdSearch\""
        );
        assert!(DetectionStrategy::Fuzzy.is_snippet_match());
        assert!(!DetectionStrategy::ExternalScript.is_snippet_match());
    }
}
