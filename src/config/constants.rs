//! Configuration constants.
//!
//! This module defines the constants used throughout the checker: request
//! identification, size limits and the context windows used when reporting
//! where a pixel was found.

/// Per-request timeout in seconds used when no explicit value is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default port for the `serve` subcommand.
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// User-Agent sent with the minimal header profile.
///
/// Identifies the tool honestly. Used for direct-HTML checks and as the
/// fallback profile in tag-manager mode.
pub const TOOL_USER_AGENT: &str = "Mozilla/5.0 (compatible; PixelPlacementHelper/1.0)";

/// User-Agent sent with the desktop-browser header profile (tag-manager mode).
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// Response and body size limits
/// Maximum response body size in bytes (5MB)
/// Larger pages are rejected rather than scanned
pub const MAX_RESPONSE_BODY_SIZE: usize = 5 * 1024 * 1024;

// Context windows (in characters) around a match
/// Characters kept before a vendor-signature match
pub const VENDOR_CONTEXT_BEFORE: usize = 120;
/// Characters kept after the start of a vendor-signature match
pub const VENDOR_CONTEXT_AFTER: usize = 240;
/// Characters kept on each side of a pixel ID match
pub const PIXEL_ID_CONTEXT: usize = 100;
/// Characters kept on each side of a matched snippet inside a script
pub const MATCHED_CODE_CONTEXT: usize = 100;
/// Characters of an inline script shown when its call token matched
pub const INLINE_PREVIEW_CHARS: usize = 200;

/// Maximum error detail length (in characters) copied into a verdict
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 500;
