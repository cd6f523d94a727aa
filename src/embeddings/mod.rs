pub mod ollama;

use anyhow::Result;

pub use ollama::OllamaClient;

/// Vector dimension of the default model (all-minilm)
pub const DEFAULT_EMBEDDING_DIMENSION: u32 = 384;

/// Opaque text-to-vector function.
///
/// The same embedder instance must be used for corpus build and query
/// encoding; mixing models silently degrades ranking with no error signal.
pub trait Embedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts, preserving input order
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    /// Dimension of every vector this embedder produces
    fn dimension(&self) -> usize;
}
