//! Error type definitions.
//!
//! This module defines the error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error returned by a page fetch.
///
/// The `Display` output is what ends up in a verdict, so it is phrased for
/// the person running the check.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("{status} {reason}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase (may be empty)
        reason: String,
    },

    /// The request never produced a response (DNS, connect, TLS, timeout, ...).
    #[error("{0}")]
    Transport(String),

    /// The body exceeded the configured size limit.
    #[error("response body too large ({size} bytes, limit {limit})")]
    BodyTooLarge {
        /// Observed or advertised size
        size: usize,
        /// Configured limit
        limit: usize,
    },
}

impl From<ReqwestError> for FetchError {
    fn from(e: ReqwestError) -> Self {
        if let Some(status) = e.status() {
            return FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            };
        }
        FetchError::Transport(e.to_string())
    }
}

/// Error returned when a detection request fails validation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    /// The URL is not an absolute http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A URL-trigger placement was requested without a trigger rule.
    #[error("A URL trigger rule is required when placement is \"Trigger: Page URL contains\"")]
    MissingTrigger,

    /// A required text field was empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Error raised inside a check before a verdict could be assembled.
#[derive(Error, Debug)]
pub enum CheckError {
    /// The page could not be fetched.
    #[error("Failed to fetch website: {0}")]
    Fetch(#[from] FetchError),

    /// Any other failure; reported to the caller as a generic error verdict.
    #[error("Unexpected failure: {0}")]
    Unexpected(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_status_display() {
        let err = FetchError::Status {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "404 Not Found");
    }

    #[test]
    fn test_check_error_wraps_fetch_error() {
        let err = CheckError::from(FetchError::Transport("connection refused".to_string()));
        assert_eq!(
            err.to_string(),
            "Failed to fetch website: connection refused"
        );
    }

    #[test]
    fn test_body_too_large_display() {
        let err = FetchError::BodyTooLarge {
            size: 10,
            limit: 5,
        };
        assert!(err.to_string().contains("10 bytes"));
        assert!(err.to_string().contains("limit 5"));
    }

    #[test]
    fn test_request_error_display() {
        assert_eq!(
            RequestError::MissingField("pixelId").to_string(),
            "Missing required field: pixelId"
        );
        assert!(RequestError::InvalidUrl("nope".into())
            .to_string()
            .contains("nope"));
    }
}
