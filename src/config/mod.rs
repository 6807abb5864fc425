//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, context windows)
//! - HTTP header profiles
//! - CLI option types and parsing

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use headers::*;
pub use types::{CheckArgs, Command, Config, LogFormat, LogLevel, Opt};
