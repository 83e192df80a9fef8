//! Integration tests for `GeminiClient` using wiremock HTTP mocks.

use shuddh_llm::flows::geocode_city;
use shuddh_llm::{GeminiClient, GenerationRequest, LlmError, TextGenerator};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/v1beta/models/gemini-test:generateContent";

fn test_client(base_url: &str) -> GeminiClient {
    GeminiClient::with_base_url("test-key", "gemini-test", 5, base_url)
        .expect("client construction should not fail")
}

fn text_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            { "content": { "role": "model", "parts": [ { "text": text } ] } }
        ]
    })
}

#[tokio::test]
async fn generate_returns_first_candidate_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("Breathe easy.")))
        .expect(1)
        .mount(&server)
        .await;

    let text = test_client(&server.uri())
        .generate(GenerationRequest::text("hello"))
        .await
        .expect("should generate");

    assert_eq!(text, "Breathe easy.");
}

#[tokio::test]
async fn json_requests_set_response_mime_type() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_partial_json(serde_json::json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_response(r#"{"latitude": 13.0827, "longitude": 80.2707}"#)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let coords = geocode_city(&client, "Chennai").await.expect("should geocode");

    assert!((coords.latitude - 13.0827).abs() < 1e-9);
    assert!((coords.longitude - 80.2707).abs() < 1e-9);
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .generate(GenerationRequest::text("hello"))
        .await
        .unwrap_err();

    match err {
        LlmError::Status { status, body } => {
            assert_eq!(status, 429);
            assert!(body.contains("quota"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_candidates_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .generate(GenerationRequest::text("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::EmptyResponse));
}
