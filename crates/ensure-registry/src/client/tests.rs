//! Unit tests for registry client

use super::*;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::poll::{PollConfig, PollController};
use ensure_core::PollResult;

fn request() -> LookupRequest {
    LookupRequest::new("foo", "1.0.0").unwrap()
}

fn client_for(server: &MockServer) -> RegistryClient {
    RegistryClient::with_config(ClientConfig {
        base_url: format!("{}/api/v1/crates", server.uri()),
        timeout: Duration::from_secs(5),
        ..ClientConfig::default()
    })
    .unwrap()
}

fn version_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "version": {
            "crate": name,
            "num": "1.0.0",
            "yanked": false,
            "dl_path": format!("/api/v1/crates/{}/1.0.0/download", name)
        }
    })
}

#[test]
fn test_registry_client_creation() {
    let client = RegistryClient::new().unwrap();
    assert_eq!(client.base_url(), "https://crates.io/api/v1/crates");
    assert_eq!(
        client.version_url(&request()),
        "https://crates.io/api/v1/crates/foo/1.0.0"
    );
}

#[test]
fn test_trailing_slash_is_trimmed() {
    let client = RegistryClient::with_config(ClientConfig {
        base_url: "https://mirror.example.com/api/v1/crates/".to_string(),
        ..ClientConfig::default()
    })
    .unwrap();
    assert_eq!(
        client.version_url(&request()),
        "https://mirror.example.com/api/v1/crates/foo/1.0.0"
    );
}

#[test]
fn test_invalid_base_url() {
    let result = RegistryClient::with_config(ClientConfig {
        base_url: "not a url".to_string(),
        ..ClientConfig::default()
    });
    assert!(matches!(result, Err(EnsureError::ConfigValidation { .. })));

    let result = RegistryClient::with_config(ClientConfig {
        base_url: "ftp://crates.example.com".to_string(),
        ..ClientConfig::default()
    });
    match result {
        Err(EnsureError::ConfigValidation { reason, .. }) => assert!(reason.contains("ftp")),
        other => panic!("Expected ConfigValidation error, got {:?}", other),
    }
}

#[test]
fn test_client_config_default() {
    let config = ClientConfig::default();
    assert_eq!(config.base_url, DEFAULT_REGISTRY_URL);
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.user_agent.starts_with("ensure-crate/"));
}

#[tokio::test]
async fn test_lookup_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/crates/foo/1.0.0"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(version_body("foo")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = client_for(&mock_server).lookup(&request()).await;
    assert_eq!(outcome, LookupOutcome::Found("foo".to_string()));
}

#[tokio::test]
async fn test_lookup_sends_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header(
            "User-Agent",
            format!("ensure-crate/{}", env!("CARGO_PKG_VERSION")).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(version_body("foo")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = client_for(&mock_server).lookup(&request()).await;
    assert_eq!(outcome, LookupOutcome::Found("foo".to_string()));
}

#[tokio::test]
async fn test_lookup_not_found_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/crates/foo/1.0.0"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "errors": [{ "detail": "crate `foo` does not have a version `1.0.0`" }]
        })))
        .mount(&mock_server)
        .await;

    let outcome = client_for(&mock_server).lookup(&request()).await;
    assert_eq!(outcome, LookupOutcome::NotFound);
}

#[tokio::test]
async fn test_lookup_html_body_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let outcome = client_for(&mock_server).lookup(&request()).await;
    assert_eq!(outcome, LookupOutcome::NotFound);
}

#[tokio::test]
async fn test_lookup_server_error_is_transport_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    match client_for(&mock_server).lookup(&request()).await {
        LookupOutcome::TransportFailure(detail) => assert!(detail.contains("503")),
        other => panic!("Expected TransportFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_lookup_connection_refused_is_transport_failure() {
    let client = RegistryClient::with_config(ClientConfig {
        base_url: "http://127.0.0.1:1/api/v1/crates".to_string(),
        timeout: Duration::from_secs(5),
        ..ClientConfig::default()
    })
    .unwrap();

    let outcome = client.lookup(&request()).await;
    assert!(matches!(outcome, LookupOutcome::TransportFailure(_)));
}

#[tokio::test]
async fn test_poll_against_registry_confirms_after_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/crates/foo/1.0.0"))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/crates/foo/1.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(version_body("foo")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = PollConfig::new(10, Duration::from_millis(1)).unwrap();
    let poller = PollController::new(client_for(&mock_server), config);

    let result = poller.run(&request()).await;
    assert_eq!(result, PollResult::Confirmed { attempts: 3 });
}

#[tokio::test]
async fn test_poll_against_registry_reports_mismatch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(version_body("bar")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = PollConfig::new(10, Duration::from_millis(1)).unwrap();
    let poller = PollController::new(client_for(&mock_server), config);

    let result = poller.run(&request()).await;
    assert!(matches!(result, PollResult::Mismatch { ref found, attempts: 1, .. } if found == "bar"));
}
