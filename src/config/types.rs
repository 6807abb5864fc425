//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and library configuration.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    BROWSER_USER_AGENT, DEFAULT_SERVER_PORT, DEFAULT_TIMEOUT_SECS, MAX_RESPONSE_BODY_SIZE,
    TOOL_USER_AGENT,
};
use crate::models::{DetectionRequest, Placement, PlacementMethod};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use pixel_check::Config;
///
/// let config = Config {
///     timeout_seconds: 30,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// User-Agent for the minimal header profile
    pub user_agent: String,

    /// User-Agent for the desktop-browser header profile
    pub browser_user_agent: String,

    /// Largest response body accepted, in bytes
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: TOOL_USER_AGENT.to_string(),
            browser_user_agent: BROWSER_USER_AGENT.to_string(),
            max_body_bytes: MAX_RESPONSE_BODY_SIZE,
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Check a Facebook pixel placed in <head>
/// pixel_check check --url https://example.com --platform Facebook \
///     --placement head --pixel-id 1234567890 --snippet "fbq('init', '1234567890')"
///
/// # Check a pixel injected by a tag manager
/// pixel_check check --url https://example.com --platform TikTok \
///     --method tag-manager --pixel-id ABC123
///
/// # Serve the JSON endpoint
/// pixel_check serve --port 3000
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "pixel_check",
    about = "Verifies that a marketing pixel is present and correctly placed on a web page."
)]
pub struct Opt {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_seconds: u64,

    /// User-Agent sent with the minimal header profile
    #[arg(long, default_value = TOOL_USER_AGENT, global = true)]
    pub user_agent: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a single page
    Check(CheckArgs),
    /// Serve `POST /api/check-pixel`
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = DEFAULT_SERVER_PORT)]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

/// Arguments of the `check` subcommand.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Page URL (https:// is assumed when the scheme is missing)
    #[arg(long)]
    pub url: String,

    /// Platform name, e.g. "Facebook", "Google Ads", "TikTok"
    #[arg(long)]
    pub platform: String,

    /// Expected placement
    #[arg(long, value_enum, default_value_t = Placement::Unspecified)]
    pub placement: Placement,

    /// How the pixel was installed
    #[arg(long = "method", value_enum, default_value_t = PlacementMethod::DirectHtml)]
    pub placement_method: PlacementMethod,

    /// Expected pixel/account ID
    #[arg(long)]
    pub pixel_id: String,

    /// Literal pixel snippet as installed
    #[arg(long)]
    pub snippet: Option<String>,

    /// Event name the pixel should fire
    #[arg(long)]
    pub event_name: Option<String>,

    /// Substring the page URL must contain (with `--placement url-trigger`)
    #[arg(long)]
    pub trigger_contains: Option<String>,

    /// Secondary event snippet (platforms with separate base and event code)
    #[arg(long)]
    pub event_snippet: Option<String>,

    /// Print the verdict as JSON
    #[arg(long)]
    pub json: bool,
}

impl Opt {
    /// Builds the library configuration from the global options.
    pub fn to_config(&self) -> Config {
        Config {
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            timeout_seconds: self.timeout_seconds,
            user_agent: self.user_agent.clone(),
            ..Default::default()
        }
    }
}

impl From<CheckArgs> for DetectionRequest {
    fn from(args: CheckArgs) -> Self {
        DetectionRequest {
            url: args.url,
            platform: args.platform,
            placement: args.placement,
            placement_method: args.placement_method,
            snippet: args.snippet,
            event_name: args.event_name,
            trigger_contains: args.trigger_contains,
            pixel_id: args.pixel_id,
            event_snippet: args.event_snippet,
        }
    }
}
