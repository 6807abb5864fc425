// Shared test helpers: a scripted page fetcher and common fixtures.
//
// Each integration test file includes this with `mod helpers;`.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use pixel_check::{FetchError, FetchedPage, HeaderProfile, PageFetcher};

/// Shared record of `(url, profile)` fetch calls.
pub type CallLog = Arc<Mutex<Vec<(String, HeaderProfile)>>>;

/// A `PageFetcher` that replays queued responses per header profile and
/// records every call.
///
/// A profile with an empty queue fails with a transport error.
#[derive(Default)]
pub struct MockFetcher {
    responses: Mutex<HashMap<HeaderProfile, VecDeque<Result<FetchedPage, FetchError>>>>,
    calls: CallLog,
}

#[allow(dead_code)] // Not every test file uses every helper
impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a 200 response with `html` for `profile`.
    pub fn serve(self, profile: HeaderProfile, html: &str) -> Self {
        self.push(
            profile,
            Ok(FetchedPage {
                final_url: "https://example.com/".to_string(),
                status: 200,
                html: html.to_string(),
            }),
        )
    }

    /// Queues a failure for `profile`.
    pub fn fail(self, profile: HeaderProfile, error: FetchError) -> Self {
        self.push(profile, Err(error))
    }

    fn push(self, profile: HeaderProfile, response: Result<FetchedPage, FetchError>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(profile)
            .or_default()
            .push_back(response);
        self
    }

    /// A handle on the call log that outlives moving the fetcher into a checker.
    pub fn call_log(&self) -> CallLog {
        Arc::clone(&self.calls)
    }
}

/// Profiles requested so far, in order.
#[allow(dead_code)]
pub fn profiles_requested(log: &CallLog) -> Vec<HeaderProfile> {
    log.lock().unwrap().iter().map(|(_, p)| *p).collect()
}

impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str, profile: HeaderProfile) -> Result<FetchedPage, FetchError> {
        self.calls.lock().unwrap().push((url.to_string(), profile));
        self.responses
            .lock()
            .unwrap()
            .get_mut(&profile)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(FetchError::Transport(format!("no scripted response for {profile}"))))
    }
}

/// A page with a Facebook pixel initialised with ID 123 in `<head>`.
#[allow(dead_code)]
pub const FACEBOOK_HEAD_PAGE: &str = "<html><head><title>Shop</title><script>!function(f){}(window);fbq('init','123');fbq('track','PageView');</script></head><body><h1>Welcome</h1></body></html>";
