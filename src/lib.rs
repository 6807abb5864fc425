//! pixel_check library: marketing pixel verification
//!
//! Given a page URL, an advertising platform and what the marketer believes
//! they installed (snippet, expected placement, pixel ID, event name), this
//! library fetches the page and reports whether the pixel is present,
//! whether it sits where it should, and what is wrong with it.
//!
//! # Example
//!
//! ```no_run
//! use pixel_check::{init_client, Config, DetectionRequest, HttpFetcher, Placement, PixelChecker};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let client = init_client(&config)?;
//! let checker = PixelChecker::new(HttpFetcher::new(client, &config));
//!
//! let request = DetectionRequest::new("https://example.com", "Facebook", "1234567890")
//!     .with_placement(Placement::Head)
//!     .with_snippet("fbq('init', '1234567890');")
//!     .validate()?;
//!
//! let verdict = checker.check(&request).await;
//! println!("{}: {}", verdict.status, verdict.summary);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! `PixelChecker::check` requires a Tokio runtime: detection runs on the
//! blocking thread pool. `check::check_page` is the synchronous entry point
//! for HTML that is already in hand.

pub mod app;
pub mod check;
pub mod config;
pub mod detection;
pub mod diagnostics;
pub mod document;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod models;
pub mod normalize;
pub mod platform;
pub mod server;
mod utils;

// Re-export public API
pub use check::{check_page, PixelChecker};
pub use config::{Config, HeaderProfile, LogFormat, LogLevel};
pub use diagnostics::{DiagnosticEvent, DiagnosticSink, LogSink, NoopSink, RecordingSink};
pub use error_handling::{CheckError, FetchError, InitializationError, RequestError};
pub use fetch::{FetchedPage, HttpFetcher, PageFetcher};
pub use initialization::{init_client, init_logger_with};
pub use models::{
    CheckMethod, DetectionRequest, DetectionStrategy, EventSnippetOutcome, PixelIdOutcome,
    Placement, PlacementMethod, Verdict, VerdictStatus,
};
pub use platform::Platform;
