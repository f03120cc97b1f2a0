//! Core traits for docrag components.
//!
//! This module defines the seams between the engine and its collaborators:
//!
//! - [`ContentExtractor`]: Turn an uploaded file into raw text
//! - [`Embedder`]: Generate vector embeddings
//! - [`VectorStore`]: Store fragments and catalog entries, serve read views
//! - [`AnswerBackend`]: Optional natural-language answer generation
//!
//! The engine depends only on these traits, never on concrete providers, so
//! implementations can be swapped without touching the rest of the system.

use async_trait::async_trait;
use std::path::Path;
use uuid::Uuid;

use crate::error::{EmbedError, ExtractError, GenerateError, StoreError};
use crate::types::{DocumentMetadata, Fragment, StoreStats};

// ============================================================================
// Content Extraction
// ============================================================================

/// Trait for extracting raw text from files.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    /// File extensions (lowercase, no dot) this extractor handles.
    fn extensions(&self) -> &[&str];

    /// Check whether this extractor handles the given path.
    fn can_extract(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext.to_lowercase().as_str()))
    }

    /// Extract the file's text content.
    async fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}

// ============================================================================
// Embedding
// ============================================================================

/// Trait for generating embeddings.
///
/// Embeddings from different providers (or different models of the same
/// provider) are not comparable; a store only ever holds vectors produced by
/// the one embedder the engine was built with.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Model name/identifier.
    fn model_name(&self) -> &str;

    /// Fixed output width of every vector this embedder produces.
    fn dimension(&self) -> usize;

    /// Embed a batch of texts, one vector per input, in input order.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError>;

    /// Embed a single query string.
    async fn embed_query(&self, query: &str) -> Result<Vec<f32>, EmbedError> {
        let mut vectors = self.embed_batch(&[query]).await?;
        vectors
            .pop()
            .ok_or_else(|| EmbedError::Inference("empty embedding result".to_string()))
    }
}

// ============================================================================
// Vector Storage
// ============================================================================

/// Trait for the fragment store and the document catalog layered on it.
///
/// Implementations must preserve fragment insertion order: ranking breaks
/// similarity ties by the order fragments entered the store.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Store a document's fragments and its catalog entry in one step.
    ///
    /// Fails with [`StoreError::EmptyAppend`] when `fragments` is empty; an
    /// ingestion that produced no fragments must be rejected, not recorded.
    async fn append(
        &self,
        document: DocumentMetadata,
        fragments: Vec<Fragment>,
    ) -> Result<(), StoreError>;

    /// Delete every fragment owned by `document_id` and its catalog entry.
    ///
    /// Idempotent: removing an unknown id removes nothing and returns 0.
    async fn remove_document(&self, document_id: Uuid) -> Result<u64, StoreError>;

    /// Remove every fragment and every catalog entry.
    async fn clear(&self) -> Result<(), StoreError>;

    /// Read view of all fragments, in insertion order.
    async fn all_fragments(&self) -> Result<Vec<Fragment>, StoreError>;

    /// All catalog entries, in ingestion order.
    async fn list_documents(&self) -> Result<Vec<DocumentMetadata>, StoreError>;

    /// Number of catalog entries.
    async fn document_count(&self) -> Result<usize, StoreError>;

    /// Store statistics.
    async fn stats(&self) -> Result<StoreStats, StoreError>;
}

// ============================================================================
// Answer Generation
// ============================================================================

/// Capability for turning a prompt into natural-language text.
///
/// The composer depends only on this trait; "no backend configured" is just
/// another implementation that always fails with
/// [`GenerateError::NotConfigured`], which the composer recovers from like
/// any other generation failure.
#[async_trait]
pub trait AnswerBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Generate text for the prompt. One bounded attempt, no retries.
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UppercaseBackend;

    #[async_trait]
    impl AnswerBackend for UppercaseBackend {
        fn name(&self) -> &str {
            "uppercase"
        }

        async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
            Ok(prompt.to_uppercase())
        }
    }

    struct FixedEmbedder;

    #[async_trait]
    impl Embedder for FixedEmbedder {
        fn model_name(&self) -> &str {
            "fixed"
        }

        fn dimension(&self) -> usize {
            3
        }

        async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
            Ok(texts.iter().map(|_| vec![1.0, 0.0, 0.0]).collect())
        }
    }

    struct TxtExtractor;

    #[async_trait]
    impl ContentExtractor for TxtExtractor {
        fn extensions(&self) -> &[&str] {
            &["txt"]
        }

        async fn extract(&self, _path: &Path) -> Result<String, ExtractError> {
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn test_embed_query_default_uses_batch() {
        let embedder = FixedEmbedder;
        let vector = embedder.embed_query("anything").await.unwrap();
        assert_eq!(vector, vec![1.0, 0.0, 0.0]);
    }

    #[tokio::test]
    async fn test_answer_backend_object_safety() {
        let backend: Box<dyn AnswerBackend> = Box::new(UppercaseBackend);
        assert_eq!(backend.name(), "uppercase");
        assert_eq!(backend.generate("hi").await.unwrap(), "HI");
    }

    #[test]
    fn test_can_extract_matches_extension_case_insensitively() {
        let extractor = TxtExtractor;
        assert!(extractor.can_extract(Path::new("/tmp/notes.txt")));
        assert!(extractor.can_extract(Path::new("/tmp/NOTES.TXT")));
        assert!(!extractor.can_extract(Path::new("/tmp/photo.png")));
        assert!(!extractor.can_extract(Path::new("/tmp/no_extension")));
    }
}
