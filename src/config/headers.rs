//! HTTP header profiles.
//!
//! Two profiles are used when fetching a page:
//! - `Minimal`: only a tool-identifying User-Agent (direct-HTML checks)
//! - `DesktopBrowser`: the full header set of a desktop Chrome browser, used in
//!   tag-manager mode to approximate what a normal visitor receives

use serde::Serialize;
use strum_macros::{Display, EnumIter};

use crate::config::constants::{BROWSER_USER_AGENT, TOOL_USER_AGENT};

/// Accept header sent by desktop Chrome
pub const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";
/// Accept-Language header sent by desktop Chrome
pub const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
/// Accept-Encoding header sent by desktop Chrome
pub const BROWSER_ACCEPT_ENCODING: &str = "gzip, deflate, br";
/// Client hint brand list for Chrome 120
pub const BROWSER_SEC_CH_UA: &str =
    "\"Not_A Brand\";v=\"8\", \"Chromium\";v=\"120\", \"Google Chrome\";v=\"120\"";

/// A named set of request headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderProfile {
    /// Tool identifier only
    #[strum(serialize = "minimal")]
    Minimal,
    /// Full desktop-Chrome header set
    #[strum(serialize = "desktop-browser")]
    DesktopBrowser,
}

impl HeaderProfile {
    /// Returns the profile's headers as (name, value) pairs, using the given
    /// User-Agent strings.
    pub fn headers_with(
        self,
        tool_user_agent: &str,
        browser_user_agent: &str,
    ) -> Vec<(&'static str, String)> {
        match self {
            HeaderProfile::Minimal => vec![("user-agent", tool_user_agent.to_string())],
            HeaderProfile::DesktopBrowser => vec![
                ("user-agent", browser_user_agent.to_string()),
                ("accept", BROWSER_ACCEPT.to_string()),
                ("accept-language", BROWSER_ACCEPT_LANGUAGE.to_string()),
                ("accept-encoding", BROWSER_ACCEPT_ENCODING.to_string()),
                ("cache-control", "no-cache".to_string()),
                ("pragma", "no-cache".to_string()),
                ("sec-ch-ua", BROWSER_SEC_CH_UA.to_string()),
                ("sec-ch-ua-mobile", "?0".to_string()),
                ("sec-ch-ua-platform", "\"macOS\"".to_string()),
                ("sec-fetch-dest", "document".to_string()),
                ("sec-fetch-mode", "navigate".to_string()),
                ("sec-fetch-site", "none".to_string()),
                ("sec-fetch-user", "?1".to_string()),
                ("upgrade-insecure-requests", "1".to_string()),
            ],
        }
    }

    /// Returns the profile's headers with the default User-Agent strings.
    pub fn headers(self) -> Vec<(&'static str, String)> {
        self.headers_with(TOOL_USER_AGENT, BROWSER_USER_AGENT)
    }
}
