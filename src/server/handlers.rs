//! Endpoint handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use strum::IntoEnumIterator;

use super::types::{CheckPixelPayload, ServerState};
use crate::error_handling::sanitize_error_detail;
use crate::fetch::PageFetcher;
use crate::models::{CheckMethod, DetectionRequest, PlacementMethod, Verdict};
use crate::platform::Platform;

/// Runs one check. Malformed or invalid requests get a 400 with an `error` verdict.
pub async fn check_pixel_handler<F: PageFetcher + 'static>(
    State(state): State<ServerState<F>>,
    payload: Result<Json<CheckPixelPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => return bad_request(&rejection.body_text(), CheckMethod::Static),
    };

    let method = match payload.placement_method {
        PlacementMethod::DirectHtml => CheckMethod::Static,
        PlacementMethod::TagManager => CheckMethod::Browser,
    };
    let request = match DetectionRequest::from(payload).validate() {
        Ok(request) => request,
        Err(e) => return bad_request(&e.to_string(), method),
    };

    let verdict = state.checker.check(&request).await;
    (StatusCode::OK, Json(verdict)).into_response()
}

/// Lists the platform names with a detection catalog.
pub async fn platforms_handler() -> Json<Vec<String>> {
    Json(Platform::iter().map(|p| p.to_string()).collect())
}

fn bad_request(message: &str, method: CheckMethod) -> Response {
    log::warn!("Rejected check request: {message}");
    let verdict = Verdict::error(
        format!("Invalid request: {}", sanitize_error_detail(message)),
        method,
    );
    (StatusCode::BAD_REQUEST, Json(verdict)).into_response()
}
