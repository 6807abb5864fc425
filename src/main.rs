//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `pixel_check` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use pixel_check::app::{exit_code, render_verdict};
use pixel_check::config::{CheckArgs, Command, Opt};
use pixel_check::server::start_server;
use pixel_check::{init_client, init_logger_with, CheckMethod, DetectionRequest, HttpFetcher, PixelChecker, Verdict};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env (e.g. RUST_LOG), falling back to
    // a .env next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();
    let config = opt.to_config();
    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let client = init_client(&config).context("Failed to initialize HTTP client")?;
    let checker = PixelChecker::new(HttpFetcher::new(client, &config));

    match opt.command {
        Command::Check(args) => {
            let code = run_check(&checker, args).await?;
            process::exit(code);
        }
        Command::Serve { port, bind } => {
            if let Err(e) = start_server(&bind, port, Arc::new(checker)).await {
                eprintln!("pixel_check error: {e:#}");
                process::exit(1);
            }
            Ok(())
        }
    }
}

async fn run_check(checker: &PixelChecker<HttpFetcher>, args: CheckArgs) -> Result<i32> {
    let json = args.json;
    let verdict = match DetectionRequest::from(args).validate() {
        Ok(request) => checker.check(&request).await,
        Err(e) => Verdict::error(format!("Invalid request: {e}"), CheckMethod::Static),
    };

    if json {
        let rendered = serde_json::to_string_pretty(&verdict).context("Failed to serialize verdict")?;
        println!("{rendered}");
    } else {
        println!("{}", render_verdict(&verdict));
    }
    Ok(exit_code(&verdict))
}
