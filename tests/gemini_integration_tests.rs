use emoji_zoo::content::{ContentProvider, GeminiProvider, GenerationError, fallback_session};
use emoji_zoo::core::model::TemplateId;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

// ============================================================================
// Helper Functions
// ============================================================================

const ENDPOINT: &str = "/models/test-model:generateContent";

fn provider(server: &MockServer) -> GeminiProvider {
    GeminiProvider::new(
        "test-key".to_string(),
        Some(server.uri()),
        "test-model".to_string(),
    )
}

/// Wraps generated text the way generateContent returns it
fn candidate_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

async fn mount(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(response)
        .mount(server)
        .await;
}

// ============================================================================
// Success
// ============================================================================

#[tokio::test]
async fn test_gemini_returns_generated_session() {
    let mock_server = MockServer::start().await;
    let mut expected = fallback_session();
    expected.coloring.template_id = TemplateId::Bird;
    let text = serde_json::to_string(&expected).unwrap();

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(&text)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = provider(&mock_server).generate_session().await.unwrap();
    assert_eq!(session, expected);
}

#[tokio::test]
async fn test_gemini_accepts_unknown_template_as_fish() {
    let mock_server = MockServer::start().await;
    let mut value = serde_json::to_value(fallback_session()).unwrap();
    value["coloring"]["templateId"] = json!("dragon");
    mount(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(candidate_body(&value.to_string())),
    )
    .await;

    let session = provider(&mock_server).generate_session().await.unwrap();
    assert_eq!(session.coloring.template_id, TemplateId::Fish);
}

#[tokio::test]
async fn test_gemini_sends_configured_temperature() {
    let mock_server = MockServer::start().await;
    let text = serde_json::to_string(&fallback_session()).unwrap();

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_partial_json(json!({
            "generationConfig": { "temperature": 0.5 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(&text)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = provider(&mock_server)
        .with_temperature(0.5)
        .generate_session()
        .await;
    assert!(result.is_ok());
}

// ============================================================================
// Failures (all recoverable by the fallback session)
// ============================================================================

#[tokio::test]
async fn test_gemini_http_error() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    let err = provider(&mock_server).generate_session().await.unwrap_err();
    match err {
        GenerationError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("Internal Server Error"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_gemini_rejected_key() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED" }
        })),
    )
    .await;

    let err = provider(&mock_server).generate_session().await.unwrap_err();
    assert!(matches!(err, GenerationError::Api { status: 403, .. }));
}

#[tokio::test]
async fn test_gemini_no_candidates() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })),
    )
    .await;

    let err = provider(&mock_server).generate_session().await.unwrap_err();
    assert_eq!(err, GenerationError::EmptyResponse);
}

#[tokio::test]
async fn test_gemini_malformed_envelope() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("not json at all"),
    )
    .await;

    let err = provider(&mock_server).generate_session().await.unwrap_err();
    assert!(matches!(err, GenerationError::Parse(_)));
}

#[tokio::test]
async fn test_gemini_generated_text_not_a_session() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(candidate_body("{\"levels\": \"soon\"}")),
    )
    .await;

    let err = provider(&mock_server).generate_session().await.unwrap_err();
    assert!(matches!(err, GenerationError::Parse(_)));
}

#[tokio::test]
async fn test_gemini_session_with_forbidden_symbol() {
    let mock_server = MockServer::start().await;
    let mut session = fallback_session();
    session.levels[0].options.push(vec!["🐷".to_string()]);
    let text = serde_json::to_string(&session).unwrap();
    mount(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(candidate_body(&text)),
    )
    .await;

    let err = provider(&mock_server).generate_session().await.unwrap_err();
    assert!(matches!(err, GenerationError::Schema(_)));
}

#[tokio::test]
async fn test_gemini_session_without_levels() {
    let mock_server = MockServer::start().await;
    let mut session = fallback_session();
    session.levels.clear();
    let text = serde_json::to_string(&session).unwrap();
    mount(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(candidate_body(&text)),
    )
    .await;

    let err = provider(&mock_server).generate_session().await.unwrap_err();
    assert!(matches!(err, GenerationError::Schema(_)));
}

#[tokio::test]
async fn test_gemini_timeout_is_network_error() {
    let mock_server = MockServer::start().await;
    let text = serde_json::to_string(&fallback_session()).unwrap();
    mount(
        &mock_server,
        ResponseTemplate::new(200)
            .set_body_json(candidate_body(&text))
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let err = provider(&mock_server)
        .with_timeout(Duration::from_millis(200))
        .generate_session()
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Network(_)));
}

#[tokio::test]
async fn test_gemini_unreachable_server() {
    let provider = GeminiProvider::new(
        "test-key".to_string(),
        Some("http://127.0.0.1:1".to_string()),
        "test-model".to_string(),
    );
    let err = provider.generate_session().await.unwrap_err();
    assert!(matches!(err, GenerationError::Network(_)));
}
