//! `HttpFetcher` against local mock servers.
//!
//! Uses `wiremock` to inspect the headers each profile sends and `httptest`
//! for status and size handling.

use httptest::{matchers::*, responders::*, Expectation, Server};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pixel_check::{init_client, Config, FetchError, HeaderProfile, HttpFetcher, PageFetcher};

fn test_fetcher(config: Config) -> HttpFetcher {
    let client = init_client(&config).expect("Failed to create client");
    HttpFetcher::new(client, &config)
}

fn test_config() -> Config {
    Config {
        user_agent: "pixel-check-test/1.0".to_string(),
        browser_user_agent: "test-browser/1.0".to_string(),
        timeout_seconds: 5,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_minimal_profile_sends_tool_user_agent_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/landing"))
        .and(header("user-agent", "pixel-check-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><head></head></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let page = test_fetcher(test_config())
        .fetch(&format!("{}/landing", server.uri()), HeaderProfile::Minimal)
        .await
        .expect("fetch should succeed");

    assert_eq!(page.status, 200);
    assert!(page.html.contains("<head>"));
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("sec-fetch-mode").is_none());
}

#[tokio::test]
async fn test_desktop_browser_profile_sends_browser_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/landing"))
        .and(header("user-agent", "test-browser/1.0"))
        .and(header("sec-fetch-mode", "navigate"))
        .and(header("sec-fetch-dest", "document"))
        .and(header("pragma", "no-cache"))
        .and(header("upgrade-insecure-requests", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let page = test_fetcher(test_config())
        .fetch(&format!("{}/landing", server.uri()), HeaderProfile::DesktopBrowser)
        .await
        .expect("fetch should succeed");

    assert_eq!(page.html, "<html>ok</html>");
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/missing"))
            .respond_with(status_code(404).body("Not Found")),
    );

    let url = format!("http://{}/missing", server.addr());
    let result = test_fetcher(test_config()).fetch(&url, HeaderProfile::Minimal).await;

    match result {
        Err(FetchError::Status { status, reason }) => {
            assert_eq!(status, 404);
            assert_eq!(reason, "Not Found");
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_redirects_are_followed() {
    let server = Server::run();
    let final_url = format!("http://{}/final", server.addr());
    server.expect(
        Expectation::matching(request::method_path("GET", "/start"))
            .respond_with(status_code(301).append_header("Location", final_url.as_str())),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/final"))
            .respond_with(status_code(200).body("<html>final</html>")),
    );

    let url = format!("http://{}/start", server.addr());
    let page = test_fetcher(test_config())
        .fetch(&url, HeaderProfile::Minimal)
        .await
        .expect("fetch should succeed");

    assert_eq!(page.final_url, final_url);
    assert_eq!(page.html, "<html>final</html>");
}

#[tokio::test]
async fn test_body_is_decoded_with_declared_charset() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/latin1")).respond_with(
            status_code(200)
                .append_header("Content-Type", "text/html; charset=iso-8859-1")
                .body(b"<p>caf\xe9</p>".to_vec()),
        ),
    );

    let url = format!("http://{}/latin1", server.addr());
    let page = test_fetcher(test_config())
        .fetch(&url, HeaderProfile::Minimal)
        .await
        .expect("fetch should succeed");

    assert_eq!(page.html, "<p>caf\u{e9}</p>");
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/big"))
            .respond_with(status_code(200).body("x".repeat(2048))),
    );

    let config = Config {
        max_body_bytes: 1024,
        ..test_config()
    };
    let url = format!("http://{}/big", server.addr());
    let result = test_fetcher(config).fetch(&url, HeaderProfile::Minimal).await;

    assert!(matches!(
        result,
        Err(FetchError::BodyTooLarge { limit: 1024, .. })
    ));
}

#[tokio::test]
async fn test_connection_refused_is_a_transport_error() {
    // Bind then drop a listener to get a port nobody is listening on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = test_fetcher(test_config())
        .fetch(&format!("http://{addr}/"), HeaderProfile::Minimal)
        .await;

    assert!(matches!(result, Err(FetchError::Transport(_))));
}
