use super::*;
use crate::config::OllamaConfig;

#[test]
fn client_configuration() {
    let config = OllamaConfig {
        protocol: "http".to_string(),
        host: "test-host".to_string(),
        port: 1234,
        model: "test-model".to_string(),
        batch_size: 128,
        embedding_dimension: 384,
    };
    let client = OllamaClient::new(&config).expect("Failed to create client");

    assert_eq!(client.model, "test-model");
    assert_eq!(client.batch_size, 128);
    assert_eq!(client.base_url.host_str(), Some("test-host"));
    assert_eq!(client.base_url.port(), Some(1234));
    assert_eq!(client.dimension, 384);
    assert_eq!(client.retry_attempts, DEFAULT_RETRY_ATTEMPTS);
}

#[test]
fn client_builder_methods() {
    let config = OllamaConfig::default();
    let client = OllamaClient::new(&config)
        .expect("Failed to create client")
        .with_timeout(Duration::from_secs(60))
        .with_retry_attempts(5);

    assert_eq!(client.retry_attempts, 5);
}

#[test]
fn dimension_check_rejects_wrong_length() {
    let config = OllamaConfig::default();
    let client = OllamaClient::new(&config).expect("Failed to create client");

    assert!(client.check_dimension(384).is_ok());
    assert!(client.check_dimension(768).is_err());
}

#[test]
fn default_batch_embed_preserves_order() {
    // Trait default goes one text at a time; dimension comes from the impl
    struct Doubler;

    impl Embedder for Doubler {
        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            Ok(vec![text.len() as f32, text.len() as f32])
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    let texts = vec!["a".to_string(), "abc".to_string()];
    let embeddings = Doubler.embed_batch(&texts).expect("Failed to embed");
    assert_eq!(embeddings, vec![vec![1.0, 1.0], vec![3.0, 3.0]]);
}
