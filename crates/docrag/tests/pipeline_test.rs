//! Integration tests for the full docrag pipeline.
//!
//! Tests the complete flow: extract → chunk → embed → store → rank → compose.

use docrag_answer::{AnswerComposer, ComposerConfig, NullBackend, NO_MATCH_ANSWER};
use docrag_chunker::WordChunker;
use docrag_core::{ChunkParams, Error};
use docrag_embed::HashEmbedder;
use docrag_engine::{Engine, EngineConfig};
use docrag_extract::ExtractorRegistry;
use docrag_store::MemoryStore;
use std::sync::Arc;
use tempfile::tempdir;

const DIM: usize = 384;

fn build_engine(params: ChunkParams) -> Engine {
    Engine::new(
        Arc::new(MemoryStore::new(DIM)),
        Arc::new(HashEmbedder::new()),
        WordChunker::new(params),
        AnswerComposer::new(Arc::new(NullBackend), ComposerConfig::default()),
        EngineConfig::default(),
    )
}

fn numbered_words(n: usize) -> String {
    (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
}

#[tokio::test]
async fn test_extract_ingest_query_delete_lifecycle() {
    let dir = tempdir().unwrap();

    let ml_text = "Neural networks are a subset of machine learning algorithms. \
        They are inspired by the structure of the human brain and learn from examples.";
    let db_text = "SQL is used for querying relational databases. \
        PostgreSQL and MySQL are popular open source database systems.";

    let ml_file = dir.path().join("ml.txt");
    let db_file = dir.path().join("database.txt");
    std::fs::write(&ml_file, ml_text).unwrap();
    std::fs::write(&db_file, db_text).unwrap();

    let extractors = ExtractorRegistry::with_defaults();
    let engine = build_engine(ChunkParams::default());

    // Extract and ingest both files
    for (file, name) in [(&ml_file, "ml.txt"), (&db_file, "database.txt")] {
        let text = extractors.extract(file).await.unwrap();
        let meta = engine.ingest(None, name, &text).await.unwrap();
        assert_eq!(meta.fragment_count, 1);
    }

    let docs = engine.list_documents().await.unwrap();
    assert_eq!(docs.len(), 2);

    // A verbatim fragment query must rank its own document first
    let response = engine.query(ml_text, Some(2)).await.unwrap();
    assert_eq!(response.retrieved.len(), 2);
    assert_eq!(response.retrieved[0].source_name, "ml.txt");
    assert!((response.retrieved[0].similarity - 1.0).abs() < 1e-5);
    assert!(response.sources.contains(&"ml.txt".to_string()));
    assert!(response.answer.contains("ml.txt"));

    // Delete one document; its fragments must be gone
    let ml_id = docs.iter().find(|d| d.name == "ml.txt").unwrap().id;
    assert!(engine.delete_document(ml_id).await.unwrap());

    let response = engine.query(ml_text, Some(5)).await.unwrap();
    assert_eq!(response.retrieved.len(), 1);
    assert_eq!(response.retrieved[0].source_name, "database.txt");
}

#[tokio::test]
async fn test_600_word_document_end_to_end() {
    // 600 words with the default 500/50 window: fragments cover words
    // 0..500 and 450..600.
    let engine = build_engine(ChunkParams::default());
    let text = numbered_words(600);

    let meta = engine.ingest(None, "long.txt", &text).await.unwrap();
    assert_eq!(meta.fragment_count, 2);

    // Query with fragment 1's exact text: identical embedding, similarity 1.0
    let fragment_one: Vec<String> = (0..500).map(|i| format!("w{i}")).collect();
    let response = engine
        .query(&fragment_one.join(" "), Some(1))
        .await
        .unwrap();

    assert_eq!(response.retrieved.len(), 1);
    assert_eq!(response.retrieved[0].fragment_id.index, 0);
    assert!((response.retrieved[0].similarity - 1.0).abs() < 1e-5);
    assert!(response.confidence > 0.7);

    // Delete the document; the store is empty again and queries are rejected
    assert!(engine.delete_document(meta.id).await.unwrap());
    let err = engine.query("w0 w1 w2", None).await.unwrap_err();
    assert!(matches!(err, Error::NoDocuments));
}

#[tokio::test]
async fn test_clear_then_reingest_behaves_fresh() {
    let engine = build_engine(ChunkParams::new(10, 2).unwrap());

    engine
        .ingest(None, "a.txt", "alpha beta gamma delta")
        .await
        .unwrap();
    engine.clear().await.unwrap();

    assert!(engine.list_documents().await.unwrap().is_empty());

    let meta = engine
        .ingest(None, "b.txt", "epsilon zeta eta theta")
        .await
        .unwrap();
    assert_eq!(meta.fragment_count, 1);

    let response = engine.query("epsilon zeta eta theta", None).await.unwrap();
    assert_eq!(response.retrieved[0].source_name, "b.txt");
    assert_ne!(response.answer, NO_MATCH_ANSWER);
}

#[tokio::test]
async fn test_unsupported_upload_is_isolated_from_batch() {
    let dir = tempdir().unwrap();

    let good = dir.path().join("good.txt");
    let bad = dir.path().join("slides.pptx");
    std::fs::write(&good, "useful searchable content").unwrap();
    std::fs::write(&bad, "binary-ish").unwrap();

    let extractors = ExtractorRegistry::with_defaults();
    let engine = build_engine(ChunkParams::default());

    let mut succeeded = 0;
    let mut failed = 0;
    for file in [&good, &bad] {
        let name = file.file_name().unwrap().to_string_lossy().to_string();
        match extractors.extract(file).await {
            Ok(text) => {
                engine.ingest(None, &name, &text).await.unwrap();
                succeeded += 1;
            }
            Err(_) => failed += 1,
        }
    }

    assert_eq!(succeeded, 1);
    assert_eq!(failed, 1);
    assert_eq!(engine.stats().await.unwrap().total_documents, 1);
}
