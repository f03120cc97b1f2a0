//! # docrag-core
//!
//! Core types and traits for docrag, a knowledge-base search engine with
//! retrieval-augmented answer generation.
//!
//! This crate provides the foundational abstractions used throughout docrag:
//!
//! - **Content Extraction**: [`ContentExtractor`] trait for turning uploaded
//!   files into raw text
//! - **Embedding Generation**: [`Embedder`] trait for converting text to
//!   vector embeddings
//! - **Vector Storage**: [`VectorStore`] trait for the fragment store and
//!   document catalog
//! - **Answer Generation**: [`AnswerBackend`] trait for the optional
//!   natural-language generation service
//!
//! ## Architecture
//!
//! ```text
//! File → ContentExtractor → chunker → Embedder → VectorStore
//!                                                    ↓
//!                              query → ranking → AnswerComposer → answer
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DocumentMetadata`] | Catalog entry for an ingested document |
//! | [`Fragment`] | One retrievable slice of a document with its embedding |
//! | [`RetrievalResult`] | A ranked fragment with its similarity score |
//! | [`QueryResponse`] | The composed answer plus its grounding context |
//!
//! ## Related Crates
//!
//! - `docrag-extract`: file-format adapters (text, PDF)
//! - `docrag-chunker`: overlapping word-window segmentation
//! - `docrag-embed`: embedder implementations
//! - `docrag-store`: in-memory vector store
//! - `docrag-retrieve`: cosine ranking
//! - `docrag-answer`: answer composition and confidence scoring
//! - `docrag-engine`: the ingest/query facade

pub mod error;
pub mod traits;
pub mod types;

pub use error::{
    ChunkError, EmbedError, Error, ExtractError, GenerateError, Result, StoreError,
};
pub use traits::*;
pub use types::*;
