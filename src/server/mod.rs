//! JSON HTTP endpoint.
//!
//! Provides two endpoints:
//! - `POST /api/check-pixel` - runs one check and returns the verdict
//! - `GET /api/platforms` - lists the supported platform names

mod handlers;
mod types;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::check::PixelChecker;
use crate::fetch::PageFetcher;
use handlers::{check_pixel_handler, platforms_handler};
pub use types::{CheckPixelPayload, ServerState};

/// Builds the endpoint router around a checker.
pub fn router<F: PageFetcher + 'static>(checker: Arc<PixelChecker<F>>) -> Router {
    Router::new()
        .route("/api/check-pixel", post(check_pixel_handler::<F>))
        .route("/api/platforms", get(platforms_handler))
        .with_state(ServerState { checker })
}

/// Binds `bind:port` and serves until the process exits.
pub async fn start_server<F: PageFetcher + 'static>(
    bind: &str,
    port: u16,
    checker: Arc<PixelChecker<F>>,
) -> Result<(), anyhow::Error> {
    let app = router(checker);

    let listener = tokio::net::TcpListener::bind(format!("{bind}:{port}"))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind server to {bind}:{port}: {e}"))?;

    log::info!("Pixel check server listening on http://{bind}:{port}/");
    log::info!("  - Check: POST http://{bind}:{port}/api/check-pixel");
    log::info!("  - Platforms: GET http://{bind}:{port}/api/platforms");

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {e}"))?;

    Ok(())
}
