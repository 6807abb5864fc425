//! Per-platform regex catalogs.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use strum::IntoEnumIterator;

use super::Platform;
use crate::utils::compile_regex_unsafe;

fn compile_all(patterns: &[&str], context: &str) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| compile_regex_unsafe(p, context))
        .collect()
}

/// Everything the detectors know about one platform.
///
/// All pattern lists are ordered; detectors stop at the first hit.
#[derive(Debug, Default)]
pub struct PlatformCatalog {
    /// Call signatures or domain fragments, matched against the lowercased page.
    /// Stored without flags so `as_str()` is the literal fragment.
    pub vendor_patterns: Vec<Regex>,
    /// Loader URL patterns, matched case-insensitively against `<script src>`.
    pub external_script_patterns: Vec<Regex>,
    /// Account/pixel ID patterns with one or two capture groups, matched
    /// case-insensitively against the raw HTML.
    pub id_patterns: Vec<Regex>,
    /// Token the user's snippet must contain.
    pub required_token: Option<&'static str>,
    /// Call token searched for in inline scripts as a last resort.
    pub inline_call_token: Option<&'static str>,
    /// Alternate event-call form accepted when the event snippet is not found literally.
    pub event_fallback: Option<Regex>,
    /// Advice appended to every troubleshooting report for this platform.
    pub best_practices: &'static [&'static str],
    /// Substrings reported by the platform scan diagnostic.
    pub page_markers: &'static [&'static str],
}

impl PlatformCatalog {
    pub fn is_empty(&self) -> bool {
        self.vendor_patterns.is_empty()
            && self.external_script_patterns.is_empty()
            && self.id_patterns.is_empty()
            && self.required_token.is_none()
            && self.inline_call_token.is_none()
            && self.event_fallback.is_none()
            && self.best_practices.is_empty()
            && self.page_markers.is_empty()
    }
}

static CATALOGS: LazyLock<HashMap<Platform, PlatformCatalog>> =
    LazyLock::new(|| Platform::iter().map(|p| (p, build(p))).collect());

static EMPTY: LazyLock<PlatformCatalog> = LazyLock::new(PlatformCatalog::default);

pub(super) fn for_platform(platform: Platform) -> &'static PlatformCatalog {
    CATALOGS.get(&platform).unwrap_or_else(|| empty())
}

pub(super) fn empty() -> &'static PlatformCatalog {
    &EMPTY
}

fn build(platform: Platform) -> PlatformCatalog {
    let context = platform.as_ref();
    match platform {
        Platform::Facebook => PlatformCatalog {
            vendor_patterns: compile_all(&[r"fbq\s*\(", r"facebook.*pixel"], context),
            external_script_patterns: compile_all(
                &[r"(?i)connect\.facebook\.net.*fbevents", r"(?i)facebook\.com.*tr\?id"],
                context,
            ),
            id_patterns: compile_all(
                &[
                    r#"(?i)fbq\s*\(\s*['"]init['"]\s*,\s*['"]([^'"]+)['"]"#,
                    r"(?i)facebook\.com/tr\?id=([^&]+)",
                ],
                context,
            ),
            required_token: Some("fbq"),
            inline_call_token: Some("fbq("),
            event_fallback: None,
            best_practices: &[
                "Ensure the pixel is placed before the closing </head> tag for optimal performance",
            ],
            page_markers: &["fbq", "facebook", "connect.facebook.net"],
        },
        Platform::GoogleAds => PlatformCatalog {
            vendor_patterns: compile_all(&[r"gtag\s*\(", r"google-?ads|googletagmanager"], context),
            external_script_patterns: compile_all(
                &[r"(?i)googletagmanager\.com", r"(?i)google-analytics\.com"],
                context,
            ),
            id_patterns: compile_all(
                &[
                    r#"(?i)gtag\s*\(\s*['"]config['"]\s*,\s*['"]([^'"]+)['"]"#,
                    r#"(?i)gtag\s*\(\s*['"]js['"]\s*,\s*new\s+Date\(\)\s*\)\s*;\s*gtag\s*\(\s*['"]config['"]\s*,\s*['"]([^'"]+)['"]"#,
                ],
                context,
            ),
            required_token: Some("gtag"),
            inline_call_token: Some("gtag("),
            event_fallback: None,
            best_practices: &["Google Ads pixels work best when placed in the <head> section"],
            page_markers: &["gtag", "googletagmanager", "google-analytics", "aw-"],
        },
        Platform::TikTok => PlatformCatalog {
            vendor_patterns: compile_all(&[r"ttq\s*\.", r"tiktok-?analytics"], context),
            external_script_patterns: compile_all(&[r"(?i)tiktok\.com.*analytics"], context),
            id_patterns: compile_all(
                &[
                    r#"(?i)ttq\s*\.\s*load\s*\(\s*['"]([^'"]+)['"]"#,
                    r#"(?i)ttq\s*\.\s*init\s*\(\s*['"]([^'"]+)['"]"#,
                ],
                context,
            ),
            required_token: Some("ttq"),
            inline_call_token: Some("ttq."),
            event_fallback: None,
            best_practices: &[],
            page_markers: &["ttq", "tiktok", "analytics.tiktok.com", "tracking", "pixel"],
        },
        Platform::Pinterest => PlatformCatalog {
            vendor_patterns: compile_all(&[r"pintrk\s*\(", r"ct\.pinimg\.com|pinterest"], context),
            external_script_patterns: compile_all(&[r"(?i)pinterest\.com.*pt\.js"], context),
            id_patterns: compile_all(
                &[r#"(?i)pintrk\s*\(\s*['"]load['"]\s*,\s*['"]([^'"]+)['"]"#],
                context,
            ),
            required_token: None,
            inline_call_token: Some("pintrk("),
            event_fallback: None,
            best_practices: &[],
            page_markers: &["pintrk", "pinterest", "ct.pinimg.com"],
        },
        Platform::LinkedIn => PlatformCatalog {
            vendor_patterns: compile_all(
                &[
                    r"lintrk\s*\(",
                    r"snap\.licdn\.com",
                    r"_linkedin_partner_id",
                    r"linkedin_data_partner_ids",
                ],
                context,
            ),
            external_script_patterns: compile_all(
                &[r"(?i)snap\.licdn\.com", r"(?i)px\.ads\.linkedin\.com"],
                context,
            ),
            id_patterns: compile_all(
                &[
                    r#"(?i)lintrk\s*\(\s*['"]page['"]\s*,\s*['"]([^'"]+)['"]"#,
                    r#"(?i)_linkedin_partner_id\s*=\s*["']([^"']+)["']"#,
                    r"(?i)px\.ads\.linkedin\.com.*pid=([^&]+)",
                    r#"(?i)linkedin_partner_id\s*=\s*["']([^"']+)["']"#,
                ],
                context,
            ),
            required_token: None,
            inline_call_token: Some("lintrk("),
            event_fallback: None,
            best_practices: &[],
            page_markers: &[
                "lintrk",
                "linkedin",
                "snap.licdn.com",
                "px.ads.linkedin.com",
                "tracking",
                "pixel",
                "analytics",
            ],
        },
        Platform::Snapchat => PlatformCatalog {
            vendor_patterns: compile_all(&[r"snaptr\s*\(", r"sc-static\.net"], context),
            external_script_patterns: compile_all(&[r"(?i)sc-static\.net"], context),
            id_patterns: compile_all(
                &[r#"(?i)snaptr\s*\(\s*['"]init['"]\s*,\s*['"]([^'"]+)['"]"#],
                context,
            ),
            required_token: None,
            inline_call_token: Some("snaptr("),
            event_fallback: None,
            best_practices: &[],
            page_markers: &["snaptr", "sc-static.net"],
        },
        Platform::Reddit => PlatformCatalog {
            vendor_patterns: compile_all(&[r"rdt\s*\(", r"www\.redditstatic\.com"], context),
            external_script_patterns: Vec::new(),
            id_patterns: Vec::new(),
            required_token: None,
            inline_call_token: Some("rdt("),
            event_fallback: None,
            best_practices: &[],
            page_markers: &["rdt(", "redditstatic.com"],
        },
        Platform::Amazon => PlatformCatalog {
            vendor_patterns: compile_all(&[r"amzn-?pixels?", r"aax\.amazon-adsystem\.com"], context),
            external_script_patterns: compile_all(
                &[r"(?i)amazon-adsystem\.com", r"(?i)aax\.amazon-adsystem\.com"],
                context,
            ),
            id_patterns: compile_all(
                &[
                    r#"(?i)amzn\s*\(\s*['"]addTag['"]\s*,\s*['"]([^'"]+)['"]"#,
                    r#"(?i)amzn\s*\(\s*['"]setRegion['"]\s*,\s*['"]([^'"]+)['"]"#,
                    r#"(?i)amzn\s*\(\s*['"]trackEvent['"]\s*,\s*['"]([^'"]+)['"]"#,
                    r"(?i)amazon-adsystem\.com.*id=([^&]+)",
                    r"(?i)aax\.amazon-adsystem\.com.*id=([^&]+)",
                ],
                context,
            ),
            required_token: None,
            inline_call_token: Some("amzn("),
            event_fallback: None,
            best_practices: &[],
            page_markers: &["amzn", "amazon-adsystem", "aax", "amazon"],
        },
        Platform::Xandr => PlatformCatalog {
            vendor_patterns: compile_all(
                &[r"pixie\s*\(", r"acdn\.adnxs\.com.*pixie", r"adnxs\.com"],
                context,
            ),
            external_script_patterns: compile_all(
                &[r"(?i)acdn\.adnxs\.com.*pixie", r"(?i)adnxs\.com"],
                context,
            ),
            id_patterns: compile_all(
                &[
                    r#"(?i)pixie\s*\(\s*['"]init['"]\s*,\s*['"]([^'"]+)['"]"#,
                    r#"(?i)pixie\s*\(\s*['"]event['"]\s*,\s*['"]([^'"]+)['"]"#,
                    r"(?i)adnxs\.com.*id=([^&]+)",
                    r"(?i)acdn\.adnxs\.com.*id=([^&]+)",
                ],
                context,
            ),
            required_token: None,
            inline_call_token: Some("pixie("),
            event_fallback: Some(compile_regex_unsafe(
                r#"(?i)pixie\s*\(\s*['"]event['"]\s*,\s*['"]([^'"]+)['"]"#,
                context,
            )),
            best_practices: &[],
            page_markers: &[
                "pixie", "adnxs", "acdn", "xandr", "universal", "tracking", "pixel", "dmp",
            ],
        },
        Platform::GroundTruth => PlatformCatalog {
            vendor_patterns: compile_all(&[r"groundtruth"], context),
            page_markers: &["groundtruth"],
            ..PlatformCatalog::default()
        },
        Platform::Nextdoor => PlatformCatalog {
            vendor_patterns: compile_all(&[r"nextdoor"], context),
            page_markers: &["nextdoor"],
            ..PlatformCatalog::default()
        },
    }
}
