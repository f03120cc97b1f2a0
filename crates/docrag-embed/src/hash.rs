//! Content-hash embedder.

use async_trait::async_trait;
use docrag_core::{EmbedError, Embedder};

/// Default embedding dimension, matching common sentence-embedding models.
const DEFAULT_DIMENSION: usize = 384;

/// Deterministic embedder derived from a blake3 content hash.
///
/// Each text is hashed and the hash bytes are cycled into a fixed-width
/// vector, which is then scaled to unit length. Identical texts always
/// produce identical vectors, so a query repeating a stored fragment
/// verbatim ranks it with similarity 1.0.
///
/// # Example
///
/// ```rust
/// use docrag_embed::HashEmbedder;
/// use docrag_core::Embedder;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let embedder = HashEmbedder::new();
/// let vectors = embedder.embed_batch(&["hello", "hello"]).await?;
///
/// assert_eq!(vectors[0].len(), 384);
/// assert_eq!(vectors[0], vectors[1]);
/// # Ok(())
/// # }
/// ```
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    /// Create an embedder with the default dimension (384).
    #[must_use]
    pub fn new() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
        }
    }

    /// Create an embedder with a custom dimension.
    #[must_use]
    pub fn with_dimension(dimension: usize) -> Self {
        Self { dimension }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let hash = blake3::hash(text.as_bytes());
        let bytes = hash.as_bytes();

        let mut vector: Vec<f32> = (0..self.dimension)
            .map(|i| (f32::from(bytes[i % 32]) / 255.0) - 0.5)
            .collect();

        let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        vector
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    fn model_name(&self) -> &str {
        "blake3-hash"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }
}
