//! In-memory fragment store with its document catalog.

use async_trait::async_trait;
use docrag_core::{DocumentMetadata, Fragment, StoreError, StoreStats, VectorStore};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Everything guarded by one lock: ranking scans the full fragment list and
/// must never observe a partially applied append or removal.
struct Inner {
    /// Flattened fragments, in insertion order (the ranking tie-break order)
    fragments: Vec<Fragment>,
    /// Catalog entries, in ingestion order
    documents: Vec<DocumentMetadata>,
}

/// In-memory vector store.
///
/// Fragments are kept flattened in a single ordered list and scanned in full
/// per query; there is no sub-index. Nothing survives a restart.
///
/// # Example
///
/// ```rust
/// use docrag_store::MemoryStore;
/// use docrag_core::VectorStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new(384);
/// let stats = store.stats().await?;
/// assert_eq!(stats.total_fragments, 0);
/// # Ok(())
/// # }
/// ```
pub struct MemoryStore {
    dimension: usize,
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    /// Create a store accepting vectors of exactly `dimension` components.
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            inner: Arc::new(RwLock::new(Inner {
                fragments: Vec::new(),
                documents: Vec::new(),
            })),
        }
    }

    /// The embedding dimension this store enforces.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

#[async_trait]
impl VectorStore for MemoryStore {
    async fn append(
        &self,
        document: DocumentMetadata,
        fragments: Vec<Fragment>,
    ) -> Result<(), StoreError> {
        if fragments.is_empty() {
            return Err(StoreError::EmptyAppend(document.name));
        }

        for fragment in &fragments {
            if fragment.text.trim().is_empty() {
                return Err(StoreError::Insert(format!(
                    "fragment {} has empty text",
                    fragment.id
                )));
            }
            if fragment.embedding.len() != self.dimension {
                return Err(StoreError::Insert(format!(
                    "fragment {} has dimension {}, store expects {}",
                    fragment.id,
                    fragment.embedding.len(),
                    self.dimension
                )));
            }
        }

        let mut inner = self.inner.write().await;
        debug!(
            "Appending {} fragments for document {} ({})",
            fragments.len(),
            document.id,
            document.name
        );
        inner.fragments.extend(fragments);
        inner.documents.push(document);
        Ok(())
    }

    async fn remove_document(&self, document_id: Uuid) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().await;

        let before = inner.fragments.len();
        inner.fragments.retain(|f| f.id.document != document_id);
        let removed = (before - inner.fragments.len()) as u64;

        inner.documents.retain(|d| d.id != document_id);

        debug!("Removed {} fragments for document {}", removed, document_id);
        Ok(removed)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.fragments.clear();
        inner.documents.clear();
        debug!("Store cleared");
        Ok(())
    }

    async fn all_fragments(&self) -> Result<Vec<Fragment>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.fragments.clone())
    }

    async fn list_documents(&self) -> Result<Vec<DocumentMetadata>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.documents.clone())
    }

    async fn document_count(&self) -> Result<usize, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.documents.len())
    }

    async fn stats(&self) -> Result<StoreStats, StoreError> {
        let inner = self.inner.read().await;
        Ok(StoreStats {
            total_fragments: inner.fragments.len() as u64,
            total_documents: inner.documents.len() as u64,
        })
    }
}
