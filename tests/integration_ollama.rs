#![expect(
    clippy::tests_outside_test_module,
    reason = "integration tests are only compiled in test mode"
)]

// HTTP behavior of the embedding client against a mock Ollama server.
// The ureq client is blocking, so calls run under spawn_blocking.

use serde_json::json;
use travel_planner::config::OllamaConfig;
use travel_planner::embeddings::{Embedder, OllamaClient};
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, dimension: u32) -> OllamaClient {
    let url = Url::parse(&server.uri()).expect("Failed to parse mock server URI");
    let config = OllamaConfig {
        host: url.host_str().expect("mock server has a host").to_string(),
        port: url.port().expect("mock server has a port"),
        model: "all-minilm:latest".to_string(),
        embedding_dimension: dimension,
        ..OllamaConfig::default()
    };
    OllamaClient::new(&config)
        .expect("Failed to create client")
        .with_retry_attempts(1)
}

#[tokio::test(flavor = "multi_thread")]
async fn single_embedding_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .and(body_partial_json(json!({"model": "all-minilm:latest"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embedding": [0.1, 0.2, 0.3]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, 3);
    let embedding = tokio::task::spawn_blocking(move || client.embed("colonial forts"))
        .await
        .expect("task panicked")
        .expect("embed failed");

    assert_eq!(embedding, vec![0.1, 0.2, 0.3]);
}

#[tokio::test(flavor = "multi_thread")]
async fn batch_embedding_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embeddings": [[1.0, 0.0], [0.0, 1.0]]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, 2);
    let texts = vec!["first".to_string(), "second".to_string()];
    let embeddings = tokio::task::spawn_blocking(move || client.embed_batch(&texts))
        .await
        .expect("task panicked")
        .expect("embed_batch failed");

    assert_eq!(embeddings, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
}

#[tokio::test(flavor = "multi_thread")]
async fn wrong_dimension_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embedding": [0.1, 0.2, 0.3]
        })))
        .mount(&server)
        .await;

    // Client expects 384 dims; a 3-dim vector means the wrong model is
    // answering and must not reach the index.
    let client = client_for(&server, 384);
    let result = tokio::task::spawn_blocking(move || client.embed("text"))
        .await
        .expect("task panicked");

    let err = result.expect_err("dimension mismatch must error");
    assert!(format!("{err:#}").contains("dimension mismatch"));
}

#[tokio::test(flavor = "multi_thread")]
async fn client_error_status_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 3).with_retry_attempts(3);
    let result = tokio::task::spawn_blocking(move || client.embed("text"))
        .await
        .expect("task panicked");

    assert!(result.is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn health_check_validates_model_presence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [{"name": "all-minilm:latest", "size": 45000000}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, 384);
    let result = tokio::task::spawn_blocking(move || client.health_check())
        .await
        .expect("task panicked");

    assert!(result.is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn health_check_fails_for_missing_model() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [{"name": "nomic-embed-text:latest", "size": 274000000}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, 384);
    let result = tokio::task::spawn_blocking(move || client.health_check())
        .await
        .expect("task panicked");

    assert!(result.is_err());
}
