//! Target URL validation and normalization.

use log::warn;

/// Maximum accepted URL length, matching common browser and server limits.
const MAX_URL_LENGTH: usize = 2048;

/// Validates and normalizes the URL of the page to check.
///
/// Adds an `https://` prefix if no scheme is given, then requires a
/// syntactically valid http/https URL with a host. Logs a warning and returns
/// `None` when the URL is rejected.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let normalized = if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("https://{url}")
    } else {
        url.to_string()
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting target URL exceeding maximum length ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some() => {
            Some(normalized)
        }
        Ok(_) => {
            warn!("Rejecting target URL without an http(s) host: {url}");
            None
        }
        Err(e) => {
            warn!("Rejecting invalid target URL {url}: {e}");
            None
        }
    }
}
