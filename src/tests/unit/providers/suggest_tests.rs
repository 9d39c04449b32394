//! Suggestion Provider Unit Tests

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::providers::{HttpSuggestionProvider, ProviderError, SuggestionProvider};
use crate::core::search::script::{Script, SuggestionQuery};

fn provider(server: &MockServer, max: usize) -> HttpSuggestionProvider {
    HttpSuggestionProvider::new(
        format!("{}/sug", server.uri()),
        format!("{}/api/suggest", server.uri()),
        Duration::from_secs(5),
        max,
    )
}

// =============================================================================
// Routing
// =============================================================================

#[tokio::test]
async fn test_latin_term_uses_datamuse_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sug"))
        .and(query_param("s", "happ"))
        .and(query_param("max", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"word": "happy", "score": 1000},
            {"word": "happen", "score": 900}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let query = SuggestionQuery::new("happ");
    assert_eq!(query.script, Script::Latin);

    let words = provider(&server, 10).query(&query).await.unwrap();
    assert_eq!(words, vec!["happy", "happen"]);
}

#[tokio::test]
async fn test_devanagari_term_uses_backend_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/suggest"))
        .and(query_param("prefix", "पा"))
        .and(query_param("script", "devanagari"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["पाणी", "पान"])))
        .expect(1)
        .mount(&server)
        .await;

    let words = provider(&server, 10)
        .query(&SuggestionQuery::new("पा"))
        .await
        .unwrap();
    assert_eq!(words, vec!["पाणी", "पान"]);
}

#[tokio::test]
async fn test_mixed_term_goes_to_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/suggest"))
        .and(query_param("script", "other"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["paani"])))
        .expect(1)
        .mount(&server)
        .await;

    let words = provider(&server, 10)
        .query(&SuggestionQuery::new("paa-ni"))
        .await
        .unwrap();
    assert_eq!(words, vec!["paani"]);
}

// =============================================================================
// Response handling
// =============================================================================

#[tokio::test]
async fn test_results_truncated_to_max() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/suggest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["a1", "a2", "a3", "a4"])))
        .mount(&server)
        .await;

    let words = provider(&server, 2)
        .query(&SuggestionQuery::new("पा"))
        .await
        .unwrap();
    assert_eq!(words, vec!["a1", "a2"]);
}

#[tokio::test]
async fn test_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sug"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let words = provider(&server, 10)
        .query(&SuggestionQuery::new("zzqx"))
        .await
        .unwrap();
    assert!(words.is_empty());
}

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sug"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let err = provider(&server, 10)
        .query(&SuggestionQuery::new("happ"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ProviderError::Api {
            status: 503,
            message: "unavailable".to_string()
        }
    );
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sug"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = provider(&server, 10)
        .query(&SuggestionQuery::new("happ"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::InvalidResponse(_)));
}
