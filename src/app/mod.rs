//! Front-end helpers for the binary.
//!
//! This module provides target URL validation and terminal rendering of a
//! verdict.

pub mod report;
pub mod url;

// Re-export public API
pub use report::{exit_code, render_verdict};
pub use url::validate_and_normalize_url;
