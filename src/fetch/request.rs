//! Request building for header profiles.

use reqwest::header::{HeaderName, HeaderValue};

use crate::config::HeaderProfile;

/// Applies a header profile to a `reqwest::RequestBuilder`.
///
/// Header names come from `HeaderProfile` and are static lowercase names.
/// A value that is not a valid header value (e.g. a configured User-Agent
/// containing a newline) is skipped with a warning rather than failing the
/// fetch.
pub(crate) fn apply_profile(
    mut builder: reqwest::RequestBuilder,
    profile: HeaderProfile,
    tool_user_agent: &str,
    browser_user_agent: &str,
) -> reqwest::RequestBuilder {
    for (name, value) in profile.headers_with(tool_user_agent, browser_user_agent) {
        match HeaderValue::from_str(&value) {
            Ok(value) => builder = builder.header(HeaderName::from_static(name), value),
            Err(e) => log::warn!("Skipping invalid {name} header for {profile} profile: {e}"),
        }
    }
    builder
}
