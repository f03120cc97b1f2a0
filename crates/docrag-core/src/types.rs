//! Core types for docrag.
//!
//! This module contains the shared data structures used across docrag:
//!
//! ## Catalog
//! - [`DocumentMetadata`]: Catalog entry for an ingested document
//!
//! ## Fragments
//! - [`Fragment`]: A slice of a document's text with its embedding
//! - [`FragmentId`]: Store-unique fragment identity
//! - [`ChunkParams`]: Validated segmentation parameters
//!
//! ## Retrieval
//! - [`RetrievalResult`]: A ranked fragment with similarity score
//! - [`QueryResponse`]: Composed answer plus grounding context
//! - [`StoreStats`]: Fragment/document counts for health reporting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::ChunkError;

// ============================================================================
// Catalog
// ============================================================================

/// Catalog entry for one ingested document.
///
/// Created by a successful ingestion and never mutated afterwards;
/// re-ingesting the same file produces a new entry with a new id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Unique document identifier, stable for the document's lifetime
    pub id: Uuid,
    /// Original filename (display only)
    pub name: String,
    /// Number of fragments produced at ingestion
    pub fragment_count: u32,
    /// When the document was ingested
    pub ingested_at: DateTime<Utc>,
}

// ============================================================================
// Fragments
// ============================================================================

/// Store-unique fragment identity, derived from the owning document and the
/// fragment's sequence index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FragmentId {
    /// Owning document
    pub document: Uuid,
    /// 0-based sequence index within the document
    pub index: u32,
}

impl FragmentId {
    /// Create a fragment id for the given document and sequence index.
    #[must_use]
    pub fn new(document: Uuid, index: u32) -> Self {
        Self { document, index }
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.document, self.index)
    }
}

/// One retrievable unit of text.
///
/// A fragment cannot outlive its document: deleting the document cascades to
/// every fragment whose `id.document` matches it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    /// Fragment identity
    pub id: FragmentId,
    /// Name of the owning document (for result attribution)
    pub document_name: String,
    /// The fragment's raw text, never empty
    pub text: String,
    /// Embedding of `text`, produced once at ingestion
    pub embedding: Vec<f32>,
}

/// Validated segmentation parameters.
///
/// The window advances by `chunk_size - overlap` words per step. The fields
/// are private so a non-positive step cannot be constructed: every instance
/// went through [`ChunkParams::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkParams {
    chunk_size: usize,
    overlap: usize,
}

impl ChunkParams {
    /// Create validated parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] when `chunk_size` is zero or
    /// `overlap >= chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, ChunkError> {
        if chunk_size == 0 {
            return Err(ChunkError::InvalidConfig(
                "chunk_size must be at least 1".to_string(),
            ));
        }
        if overlap >= chunk_size {
            return Err(ChunkError::InvalidConfig(format!(
                "overlap ({overlap}) must be smaller than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Fragment size in words.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Words shared between consecutive fragments.
    #[must_use]
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Words the window advances per step, always at least 1.
    #[must_use]
    pub fn step(&self) -> usize {
        self.chunk_size - self.overlap
    }
}

impl Default for ChunkParams {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            overlap: 50,
        }
    }
}

// ============================================================================
// Retrieval
// ============================================================================

/// A fragment ranked against a query, with its cosine similarity score.
///
/// Constructed per query and discarded after the response is produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// Fragment identity
    pub fragment_id: FragmentId,
    /// Name of the source document
    pub source_name: String,
    /// The fragment's text
    pub text: String,
    /// Cosine similarity to the query vector, in [-1, 1]
    pub similarity: f32,
}

/// The full result of a query: the composed answer plus the retrieved
/// grounding context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The query as received
    pub query: String,
    /// Composed answer text
    pub answer: String,
    /// Confidence in [0.0, 0.99]; 0.0 iff nothing was retrieved
    pub confidence: f32,
    /// Distinct source document names among the grounding context
    pub sources: Vec<String>,
    /// Ranked fragments the answer was grounded on
    pub retrieved: Vec<RetrievalResult>,
}

/// Store statistics for health reporting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreStats {
    /// Total fragments held
    pub total_fragments: u64,
    /// Total catalog entries
    pub total_documents: u64,
}
