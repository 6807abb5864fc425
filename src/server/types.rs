//! Endpoint state and wire types.

use serde::Deserialize;
use std::sync::Arc;

use crate::check::PixelChecker;
use crate::models::{DetectionRequest, Placement, PlacementMethod};

/// Shared state for the endpoint
pub struct ServerState<F> {
    pub checker: Arc<PixelChecker<F>>,
}

// Manual impl: cloning the state never clones the fetcher.
impl<F> Clone for ServerState<F> {
    fn clone(&self) -> Self {
        Self {
            checker: Arc::clone(&self.checker),
        }
    }
}

/// JSON body of `POST /api/check-pixel`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckPixelPayload {
    pub url: String,
    pub platform: String,
    pub placement: Placement,
    pub placement_method: PlacementMethod,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub trigger_contains: Option<String>,
    pub pixel_id: String,
    #[serde(default)]
    pub event_snippet: Option<String>,
}

impl From<CheckPixelPayload> for DetectionRequest {
    fn from(payload: CheckPixelPayload) -> Self {
        DetectionRequest {
            url: payload.url,
            platform: payload.platform,
            placement: payload.placement,
            placement_method: payload.placement_method,
            snippet: payload.snippet,
            event_name: payload.event_name,
            trigger_contains: payload.trigger_contains,
            pixel_id: payload.pixel_id,
            event_snippet: payload.event_snippet,
        }
    }
}
