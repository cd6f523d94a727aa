
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Exact nearest-neighbor index over fixed-dimension vectors.
///
/// Search is a linear scan computing L2 distance against every stored
/// vector. The corpus is tens to low hundreds of entries, so a flat scan
/// beats any approximate structure both in simplicity and accuracy.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    /// Create an empty index accepting vectors of the given dimension
    #[inline]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
        }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of vectors stored
    #[inline]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Append a single vector, keeping insertion order
    #[inline]
    pub fn add(&mut self, vector: Vec<f32>) -> Result<(), IndexError> {
        if vector.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        self.vectors.push(vector);
        Ok(())
    }

    /// Append a batch of vectors in order. Fails on the first vector with
    /// the wrong dimension; vectors before it remain stored.
    #[inline]
    pub fn add_batch<I>(&mut self, vectors: I) -> Result<(), IndexError>
    where
        I: IntoIterator<Item = Vec<f32>>,
    {
        for vector in vectors {
            self.add(vector)?;
        }
        debug!("Index now holds {} vectors", self.vectors.len());
        Ok(())
    }

    /// Return up to `min(k, len)` nearest entries as `(position, distance)`
    /// pairs, ascending by L2 distance. Ties are broken by insertion order,
    /// matching the stable behavior of an exact linear scan. An empty index
    /// returns an empty vec rather than an error.
    #[inline]
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(usize, f32)>, IndexError> {
        if query.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, vector)| (position, euclidean_distance(query, vector)))
            .collect();

        scored.sort_unstable_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        scored.truncate(k);

        debug!(
            "Search over {} vectors returned {} results",
            self.vectors.len(),
            scored.len()
        );
        Ok(scored)
    }
}

/// L2 distance between two equal-length vectors
fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum::<f32>()
        .sqrt()
}
