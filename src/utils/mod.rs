//! Shared helpers.
//!
//! This module provides:
//! - Regex and CSS selector compilation for static patterns
//! - Char-boundary-safe text windows for match context and previews

mod pattern;
mod selector;
mod text;

pub use pattern::compile_regex_unsafe;
pub use selector::parse_selector_unsafe;
pub use text::{context_window, preview};
