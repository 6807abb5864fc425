//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::error_handling::InitializationError;

/// Maximum number of redirect hops followed when fetching a page
const MAX_REDIRECT_HOPS: usize = 10;

/// Initializes the HTTP client used for page fetches.
///
/// Creates a `reqwest::Client` configured with:
/// - Timeout from the configuration
/// - Redirect following (up to 10 hops)
/// - Rustls TLS backend
///
/// The User-Agent is not set here: every request carries the headers of its
/// `HeaderProfile`.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .build()?;
    Ok(Arc::new(client))
}
