//! The ingest/query engine.

use chrono::Utc;
use docrag_answer::AnswerComposer;
use docrag_chunker::WordChunker;
use docrag_core::{
    DocumentMetadata, Embedder, Error, Fragment, FragmentId, QueryResponse, Result, StoreStats,
    VectorStore,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Engine-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Default number of fragments retrieved per query
    pub default_top_k: usize,
    /// Upper bound on the per-request `top_k`
    pub max_top_k: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_top_k: 5,
            max_top_k: 20,
        }
    }
}

/// The docrag engine.
///
/// Owns the store and catalog for its lifetime and serializes access through
/// the store's lock; the only awaited network call during a query (the
/// generation backend) happens on a snapshot, after the store lock has been
/// released.
pub struct Engine {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    chunker: WordChunker,
    composer: AnswerComposer,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine over its collaborators.
    pub fn new(
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn Embedder>,
        chunker: WordChunker,
        composer: AnswerComposer,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            chunker,
            composer,
            config,
        }
    }

    /// Index a document's extracted text.
    ///
    /// The document gets `id_hint` as its identity when provided, a fresh id
    /// otherwise; re-ingesting the same file therefore creates a new
    /// document rather than replacing the old one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContent`] when the text is blank or produces no
    /// fragments, and propagates embedding/store failures.
    pub async fn ingest(
        &self,
        id_hint: Option<Uuid>,
        name: &str,
        text: &str,
    ) -> Result<DocumentMetadata> {
        if text.trim().is_empty() {
            return Err(Error::EmptyContent(format!(
                "document '{name}' appears to be empty"
            )));
        }

        let chunks = self.chunker.chunk(text);
        if chunks.is_empty() {
            return Err(Error::EmptyContent(format!(
                "no content could be extracted from '{name}'"
            )));
        }
        debug!("Chunked '{}' into {} fragments", name, chunks.len());

        let texts: Vec<&str> = chunks.iter().map(String::as_str).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let id = id_hint.unwrap_or_else(Uuid::new_v4);
        let metadata = DocumentMetadata {
            id,
            name: name.to_string(),
            fragment_count: chunks.len() as u32,
            ingested_at: Utc::now(),
        };

        let fragments: Vec<Fragment> = chunks
            .into_iter()
            .zip(embeddings)
            .enumerate()
            .map(|(index, (text, embedding))| Fragment {
                id: FragmentId::new(id, index as u32),
                document_name: metadata.name.clone(),
                text,
                embedding,
            })
            .collect();

        self.store.append(metadata.clone(), fragments).await?;

        info!(
            "Ingested '{}' ({} fragments) as document {}",
            metadata.name, metadata.fragment_count, metadata.id
        );
        Ok(metadata)
    }

    /// Answer a natural-language query from the indexed documents.
    ///
    /// `top_k` falls back to the configured default and is clamped to
    /// `[1, max_top_k]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyQuery`] for blank input and
    /// [`Error::NoDocuments`] when nothing has been ingested. Generation
    /// backend failures never surface: the composer recovers them via its
    /// extractive path.
    pub async fn query(&self, text: &str, top_k: Option<usize>) -> Result<QueryResponse> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyQuery);
        }
        if self.store.document_count().await? == 0 {
            return Err(Error::NoDocuments);
        }

        let top_k = top_k
            .unwrap_or(self.config.default_top_k)
            .clamp(1, self.config.max_top_k);

        let query_vector = self.embedder.embed_query(text).await?;

        // Snapshot under the store lock, rank and compose outside of it.
        let fragments = self.store.all_fragments().await?;
        let retrieved = docrag_retrieve::rank(&query_vector, &fragments, top_k);
        debug!("Retrieved {} fragments for query", retrieved.len());

        let composed = self.composer.compose(text, &retrieved).await;

        Ok(QueryResponse {
            query: text.to_string(),
            answer: composed.answer,
            confidence: composed.confidence,
            sources: composed.sources,
            retrieved,
        })
    }

    /// All catalog entries, in ingestion order.
    pub async fn list_documents(&self) -> Result<Vec<DocumentMetadata>> {
        Ok(self.store.list_documents().await?)
    }

    /// Delete a document and all its fragments.
    ///
    /// Returns whether anything was removed; deleting an unknown id is not
    /// an error.
    pub async fn delete_document(&self, id: Uuid) -> Result<bool> {
        let removed = self.store.remove_document(id).await?;
        if removed > 0 {
            info!("Deleted document {} ({} fragments)", id, removed);
        }
        Ok(removed > 0)
    }

    /// Remove every document and fragment.
    pub async fn clear(&self) -> Result<()> {
        self.store.clear().await?;
        info!("Index cleared");
        Ok(())
    }

    /// Store statistics for health reporting.
    pub async fn stats(&self) -> Result<StoreStats> {
        Ok(self.store.stats().await?)
    }

    /// The embedding dimension this engine was built with.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.embedder.dimension()
    }
}
