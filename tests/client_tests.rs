use std::time::Duration;

use echochat::api::client::{
    ApiError, ChatClient, EchoGptClient, FALLBACK_REPLY, MODEL_NAME, SYSTEM_PROMPT,
};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

/// Client pointed at the mock server, with a fast retry policy so rate-limit
/// tests don't sleep for real.
fn test_client(server: &MockServer, retries: u32) -> EchoGptClient {
    EchoGptClient::new("test-key".to_string(), server.uri())
        .with_retry_policy(retries, Duration::from_millis(1))
}

fn success_body(content: &str) -> serde_json::Value {
    serde_json::json!({"choices": [{"message": {"content": content}}]})
}

// ============================================================================
// Success Path
// ============================================================================

#[tokio::test]
async fn test_returns_first_choice_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("Hi there!")))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, 5);
    let reply = assert_ok!(client.complete("Hello").await);
    assert_eq!(reply, "Hi there!");
}

#[tokio::test]
async fn test_sends_expected_request_body() {
    let mock_server = MockServer::start().await;

    let expected_body = serde_json::json!({
        "messages": [
            {"role": "system", "content": SYSTEM_PROMPT},
            {"role": "user", "content": "Hello"}
        ],
        "model": MODEL_NAME
    });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, 5);
    assert_ok!(client.complete("Hello").await);
}

#[tokio::test]
async fn test_only_first_choice_is_used() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({"choices": [
        {"message": {"content": "first"}},
        {"message": {"content": "second"}}
    ]});
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, 5);
    assert_eq!(assert_ok!(client.complete("Hello").await), "first");
}

// ============================================================================
// Degraded Success Responses
// ============================================================================

#[tokio::test]
async fn test_empty_choices_falls_back_to_placeholder() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, 5);
    assert_eq!(assert_ok!(client.complete("Hello").await), FALLBACK_REPLY);
}

#[tokio::test]
async fn test_missing_content_falls_back_to_placeholder() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({"choices": [{"message": {}}]});
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, 5);
    assert_eq!(assert_ok!(client.complete("Hello").await), FALLBACK_REPLY);
}

#[tokio::test]
async fn test_undecodable_success_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, 5);
    let err = assert_err!(client.complete("Hello").await);
    assert!(matches!(err, ApiError::Parse(_)), "got {err:?}");
}

// ============================================================================
// Retry Behavior
// ============================================================================

#[tokio::test]
async fn test_rate_limited_requests_are_retried_until_success() {
    let mock_server = MockServer::start().await;

    // First two attempts are rate limited, then the service recovers.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("Hi there!")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, 5);
    assert_eq!(assert_ok!(client.complete("Hello").await), "Hi there!");
}

#[tokio::test]
async fn test_rate_limit_exhaustion_propagates_429() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        // 2 retries = 3 total attempts
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, 2);
    let err = assert_err!(client.complete("Hello").await);
    assert!(matches!(err, ApiError::Api { status: 429, .. }), "got {err:?}");
}

#[tokio::test]
async fn test_non_429_error_propagates_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, 5);
    let err = assert_err!(client.complete("Hello").await);
    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_propagates_without_retry() {
    let mock_server = MockServer::start().await;

    // A missing/wrong API key is not special-cased client-side; it surfaces
    // as the service's own auth failure.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, 5);
    let err = assert_err!(client.complete("Hello").await);
    assert!(matches!(err, ApiError::Api { status: 401, .. }), "got {err:?}");
}
