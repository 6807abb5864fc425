//! The JSON endpoint served on a local port with a scripted fetcher.

mod helpers;

use std::sync::Arc;

use helpers::{MockFetcher, FACEBOOK_HEAD_PAGE};
use pixel_check::server::router;
use pixel_check::{HeaderProfile, PixelChecker};
use serde_json::{json, Value};

/// Serves the router on 127.0.0.1 with an ephemeral port and returns its base URL.
async fn spawn_server(fetcher: MockFetcher) -> String {
    let app = router(Arc::new(PixelChecker::new(fetcher)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has an address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });
    format!("http://{addr}")
}

async fn post_check(base: &str, body: String) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("{base}/api/check-pixel"))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .expect("request should reach the server");
    let status = response.status().as_u16();
    let text = response.text().await.expect("Should read body");
    (status, serde_json::from_str(&text).expect("body is JSON"))
}

#[tokio::test]
async fn test_check_pixel_returns_verdict() {
    let base = spawn_server(MockFetcher::new().serve(HeaderProfile::Minimal, FACEBOOK_HEAD_PAGE)).await;

    let body = json!({
        "url": "example.com",
        "platform": "Facebook",
        "placement": "Head",
        "placementMethod": "HTML Placement",
        "snippet": "fbq('init','123')",
        "pixelId": "123"
    });
    let (status, verdict) = post_check(&base, body.to_string()).await;

    assert_eq!(status, 200);
    assert_eq!(verdict["status"], "pass");
    assert_eq!(verdict["detectedPlacement"], "Found in <head> section");
    assert_eq!(verdict["method"], "static");
    assert_eq!(verdict["strategy"], "exact");
    assert_eq!(verdict["pixelIdOutcome"]["match"], true);
}

#[tokio::test]
async fn test_missing_trigger_rule_is_rejected() {
    let base = spawn_server(MockFetcher::new()).await;

    let body = json!({
        "url": "https://example.com/thank-you",
        "platform": "Google Ads",
        "placement": "Trigger: Page URL contains",
        "placementMethod": "HTML Placement",
        "pixelId": "AW-1",
        "triggerContains": "   "
    });
    let (status, verdict) = post_check(&base, body.to_string()).await;

    assert_eq!(status, 400);
    assert_eq!(verdict["status"], "error");
    assert!(verdict["summary"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request: A URL trigger rule is required"));
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let base = spawn_server(MockFetcher::new()).await;

    let (status, verdict) = post_check(&base, "{\"url\": ".to_string()).await;

    assert_eq!(status, 400);
    assert_eq!(verdict["status"], "error");
    assert_eq!(verdict["detectedPlacement"], "Not checked");
}

#[tokio::test]
async fn test_fetch_failure_is_reported_in_verdict() {
    // No scripted response, so the fetch fails
    let base = spawn_server(MockFetcher::new()).await;

    let body = json!({
        "url": "https://example.com",
        "platform": "Facebook",
        "placement": "No specific placement",
        "placementMethod": "HTML Placement",
        "pixelId": "123"
    });
    let (status, verdict) = post_check(&base, body.to_string()).await;

    assert_eq!(status, 200);
    assert_eq!(verdict["status"], "error");
    assert!(verdict["summary"]
        .as_str()
        .unwrap()
        .starts_with("Failed to fetch website:"));
}

#[tokio::test]
async fn test_platforms_lists_catalog_names() {
    let base = spawn_server(MockFetcher::new()).await;

    let text = reqwest::get(format!("{base}/api/platforms"))
        .await
        .expect("request should reach the server")
        .text()
        .await
        .expect("Should read body");
    let platforms: Vec<String> = serde_json::from_str(&text).expect("body is a JSON list");

    assert!(platforms.contains(&"Facebook".to_string()));
    assert!(platforms.contains(&"Google Ads".to_string()));
    assert!(platforms.contains(&"TikTok".to_string()));
}
