
use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::corpus::Corpus;
use crate::embeddings::Embedder;
use crate::index::{FlatIndex, IndexError};

pub const DEFAULT_RESULT_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum RankError {
    /// Nothing was loaded into the index. Distinct from `NoMatch` so the UI
    /// can tell "nothing loaded" apart from "nothing relevant".
    #[error("No location data is loaded")]
    EmptyIndex,

    #[error("No relevant locations found")]
    NoMatch,

    #[error("Failed to embed query: {0}")]
    Embedding(#[source] anyhow::Error),

    #[error(transparent)]
    Search(#[from] IndexError),
}

/// Embed every corpus document, in corpus order, into a fresh index.
///
/// The returned index holds one vector per document at the document's
/// position, which is the invariant `rank_locations` relies on when mapping
/// search positions back to location ids.
#[inline]
pub fn build_location_index(corpus: &Corpus, embedder: &dyn Embedder) -> Result<FlatIndex> {
    let texts: Vec<String> = corpus.documents().map(|doc| doc.text.clone()).collect();

    let mut index = FlatIndex::new(embedder.dimension());
    if texts.is_empty() {
        warn!("No corpus documents found; index will be empty");
        return Ok(index);
    }

    let embeddings = embedder
        .embed_batch(&texts)
        .context("Failed to embed corpus documents")?;
    index
        .add_batch(embeddings)
        .context("Failed to add corpus embeddings to index")?;

    info!("Built location index with {} embeddings", index.len());
    Ok(index)
}

/// Rank location ids against a free-text query, nearest first.
///
/// Positions returned by the index that fall outside `location_keys` are
/// skipped rather than crashing; the corpus and key list are built from the
/// same sequence so this should never fire, but a stale key list must not
/// take the whole query down.
#[inline]
pub fn rank_locations(
    query: &str,
    location_keys: &[String],
    index: &FlatIndex,
    embedder: &dyn Embedder,
    limit: usize,
) -> Result<Vec<String>, RankError> {
    if index.is_empty() {
        return Err(RankError::EmptyIndex);
    }

    let query_vector = embedder.embed(query).map_err(RankError::Embedding)?;

    let k = limit.min(index.len());
    let matches = index.search(&query_vector, k)?;

    let mut ranked = Vec::with_capacity(matches.len());
    for (position, distance) in matches {
        match location_keys.get(position) {
            Some(key) => {
                debug!("Ranked {} at distance {:.4}", key, distance);
                ranked.push(key.clone());
            }
            None => {
                warn!(
                    "Index position {} has no location key ({} keys); skipping",
                    position,
                    location_keys.len()
                );
            }
        }
    }

    if ranked.is_empty() {
        return Err(RankError::NoMatch);
    }

    Ok(ranked)
}
