//! Page fetching.
//!
//! The checker only needs "the HTML of this URL as seen with this header
//! profile". `PageFetcher` is that capability; `HttpFetcher` implements it
//! over a shared `reqwest::Client`. Tests substitute scripted fetchers.

mod request;

use std::future::Future;
use std::sync::Arc;

use log::debug;

use crate::config::{Config, HeaderProfile};
use crate::error_handling::FetchError;

/// A successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL after redirects
    pub final_url: String,
    /// HTTP status (always 2xx)
    pub status: u16,
    /// Body decoded as text
    pub html: String,
}

/// Fetches the HTML of a page with a given header profile.
pub trait PageFetcher: Send + Sync {
    /// # Errors
    ///
    /// Returns `FetchError::Status` for non-2xx responses and
    /// `FetchError::Transport` when no response was received.
    fn fetch(
        &self,
        url: &str,
        profile: HeaderProfile,
    ) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send;
}

/// `PageFetcher` backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Arc<reqwest::Client>,
    tool_user_agent: String,
    browser_user_agent: String,
    max_body_bytes: usize,
}

impl HttpFetcher {
    pub fn new(client: Arc<reqwest::Client>, config: &Config) -> Self {
        Self {
            client,
            tool_user_agent: config.user_agent.clone(),
            browser_user_agent: config.browser_user_agent.clone(),
            max_body_bytes: config.max_body_bytes,
        }
    }

    fn check_size(&self, size: usize) -> Result<(), FetchError> {
        if size > self.max_body_bytes {
            return Err(FetchError::BodyTooLarge {
                size,
                limit: self.max_body_bytes,
            });
        }
        Ok(())
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, profile: HeaderProfile) -> Result<FetchedPage, FetchError> {
        debug!("Fetching {url} with {profile} profile");
        let builder = request::apply_profile(
            self.client.get(url),
            profile,
            &self.tool_user_agent,
            &self.browser_user_agent,
        );
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }
        if let Some(length) = response.content_length() {
            self.check_size(usize::try_from(length).unwrap_or(usize::MAX))?;
        }

        let final_url = response.url().to_string();
        // Decoded with the Content-Type charset, UTF-8 when absent
        let html = response.text().await?;
        self.check_size(html.len())?;

        debug!("Fetched {} bytes from {final_url} (status {status})", html.len());
        Ok(FetchedPage {
            final_url,
            status: status.as_u16(),
            html,
        })
    }
}
