//! Fetcher behavior against a mock server: retries, backoff, user agents

use crate::create_test_config;
use std::time::{Duration, Instant};
use webdiver::crawler::{build_http_client, FetchError, Fetcher, RetryPolicy};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> Fetcher {
    let config = create_test_config();
    let client = build_http_client(&config).expect("Failed to build client");
    Fetcher::new(client, &config)
}

#[tokio::test]
async fn test_fetch_success_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = fetcher()
        .fetch(&format!("{}/", mock_server.uri()))
        .await
        .expect("Fetch failed");
    assert_eq!(body, "<html>ok</html>");
}

#[tokio::test]
async fn test_fetch_exhausts_after_three_retries() {
    let mock_server = MockServer::start().await;

    // One initial attempt plus three retries
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .expect(4)
        .mount(&mock_server)
        .await;

    let err = fetcher()
        .fetch(&format!("{}/down", mock_server.uri()))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        FetchError::Exhausted {
            attempts: 4,
            last: Box::new(FetchError::Status(503)),
        }
    );
}

#[tokio::test]
async fn test_fetch_recovers_after_transient_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = fetcher()
        .fetch(&format!("{}/flaky", mock_server.uri()))
        .await
        .expect("Fetch should succeed on the third attempt");
    assert_eq!(body, "recovered");
}

#[tokio::test]
async fn test_backoff_waits_accumulate() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(4)
        .mount(&mock_server)
        .await;

    let unit = Duration::from_millis(20);
    let fetcher = fetcher().with_policy(RetryPolicy::new(3, unit));

    let started = Instant::now();
    let result = fetcher.fetch(&format!("{}/", mock_server.uri())).await;
    let elapsed = started.elapsed();

    assert!(result.is_err());
    // 1 + 2 + 4 units of backoff
    assert!(
        elapsed >= unit * 7,
        "expected at least {:?} of backoff, got {:?}",
        unit * 7,
        elapsed
    );
}

#[tokio::test]
async fn test_zero_retries_means_single_attempt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = fetcher().with_policy(RetryPolicy::new(0, Duration::from_millis(1)));
    let err = fetcher
        .fetch(&format!("{}/missing", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Exhausted { attempts: 1, .. }));
}

#[tokio::test]
async fn test_fetch_sends_user_agent_from_pool() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello bot"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = fetcher()
        .fetch(&format!("{}/", mock_server.uri()))
        .await
        .expect("Request without the pooled user agent");
    assert_eq!(body, "hello bot");
}

#[tokio::test]
async fn test_fetch_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("too late")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut config = create_test_config();
    config.crawler.request_timeout_secs = 1;
    config.crawler.max_retries = 0;
    let fetcher = Fetcher::new(build_http_client(&config).unwrap(), &config);

    let err = fetcher
        .fetch(&format!("{}/slow", mock_server.uri()))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        FetchError::Exhausted {
            attempts: 1,
            last: Box::new(FetchError::Timeout),
        }
    );
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind and drop a listener so nothing answers on the port
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let uri = format!("http://127.0.0.1:{}", port);

    let fetcher = fetcher().with_policy(RetryPolicy::new(1, Duration::from_millis(1)));
    let err = fetcher.fetch(&format!("{}/", uri)).await.unwrap_err();

    match err {
        FetchError::Exhausted { attempts, last } => {
            assert_eq!(attempts, 2);
            assert!(matches!(*last, FetchError::Transport(_)));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
