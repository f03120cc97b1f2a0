//! # docrag-engine
//!
//! The engine facade tying the docrag pipeline together.
//!
//! One [`Engine`] owns the vector store, the embedder, the chunker, and the
//! answer composer, and exposes the five operations the transport layer
//! consumes: ingest, query, list, delete, and clear. There is no hidden
//! global: the caller constructs the engine, holds it (typically in an
//! `Arc`), and drops it to shut down.
//!
//! ```text
//! ingest(text) → chunk → embed → store.append
//! query(text)  → embed → rank over store → compose → QueryResponse
//! ```

pub mod engine;

pub use engine::{Engine, EngineConfig};
