//! HTTP IP lookup against a mock enrichment service

use crate::create_test_config;
use webdiver::crawler::build_http_client;
use webdiver::{DiverError, HttpIpLookup, IpLookup};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn lookup_for(mock_server: &MockServer) -> HttpIpLookup {
    let mut config = create_test_config();
    config.enrichment.endpoint = format!("{}/json/{{host}}", mock_server.uri());
    HttpIpLookup::from_config(build_http_client(&config).unwrap(), &config)
}

#[tokio::test]
async fn test_lookup_returns_raw_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/example.com"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"status":"success","query":"93.184.216.34"}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let lookup = lookup_for(&mock_server).await;
    let payload = lookup.lookup("example.com").await.unwrap();

    assert!(payload.contains("93.184.216.34"));
}

#[tokio::test]
async fn test_lookup_error_status_is_enrichment_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/example.com"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&mock_server)
        .await;

    let lookup = lookup_for(&mock_server).await;
    let err = lookup.lookup("example.com").await.unwrap_err();

    match err {
        DiverError::Enrichment { host, message } => {
            assert_eq!(host, "example.com");
            assert!(message.contains("429"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_lookup_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let lookup = lookup_for(&mock_server).await;
    assert!(lookup.lookup("example.com").await.is_err());
}
