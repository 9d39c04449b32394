//! Definition Provider Unit Tests

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::models::Example;
use crate::core::providers::{DefinitionProvider, HttpDefinitionProvider, ProviderError};

fn provider(server: &MockServer) -> HttpDefinitionProvider {
    HttpDefinitionProvider::new(format!("{}/api/lookup", server.uri()), Duration::from_secs(5))
}

async fn respond(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/lookup"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_lookup_maps_backend_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/lookup"))
        .and(query_param("word", "पाणी"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "word": "पाणी",
            "language": "marathi",
            "meaning": "water",
            "explanation": "The clear liquid that forms rain.",
            "examples": [
                {"marathi": "मला पाणी हवे आहे.", "english": "I want water."}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let entry = provider(&server).lookup("पाणी").await.unwrap();
    assert_eq!(entry.word, "पाणी");
    assert_eq!(entry.language, "marathi");
    assert_eq!(entry.meaning, "water");
    assert_eq!(
        entry.examples,
        vec![Example::new("मला पाणी हवे आहे.", "I want water.")]
    );
}

#[tokio::test]
async fn test_lookup_accepts_generic_example_keys() {
    let server = MockServer::start().await;
    respond(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "word": " happy ",
            "meaning": "feeling pleasure",
            "examples": [{"source": "I am happy.", "target": "मी आनंदी आहे."}]
        })),
    )
    .await;

    let entry = provider(&server).lookup("happy").await.unwrap();
    assert_eq!(entry.word, "happy");
    assert!(entry.explanation.is_empty());
    assert_eq!(entry.examples[0].source, "I am happy.");
}

#[tokio::test]
async fn test_lookup_not_found() {
    let server = MockServer::start().await;
    respond(&server, ResponseTemplate::new(404)).await;

    let err = provider(&server).lookup("zzqx").await.unwrap_err();
    assert_eq!(err, ProviderError::NotFound("zzqx".to_string()));
}

#[tokio::test]
async fn test_lookup_server_error() {
    let server = MockServer::start().await;
    respond(&server, ResponseTemplate::new(500).set_body_string("boom")).await;

    let err = provider(&server).lookup("happy").await.unwrap_err();
    assert!(matches!(err, ProviderError::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_lookup_malformed_body() {
    let server = MockServer::start().await;
    respond(&server, ResponseTemplate::new(200).set_body_string("<html>")).await;

    let err = provider(&server).lookup("happy").await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_lookup_blank_word_rejected() {
    let server = MockServer::start().await;
    respond(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"word": "   ", "meaning": "?"})),
    )
    .await;

    let err = provider(&server).lookup("happy").await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidResponse(_)));
}
