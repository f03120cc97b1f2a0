//! Error types for docrag.

use thiserror::Error;

/// Main error type for docrag operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Content extraction failed
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractError),

    /// Chunking failed
    #[error("chunking error: {0}")]
    Chunking(#[from] ChunkError),

    /// Embedding generation failed
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbedError),

    /// Vector store operation failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Document produced no usable text or fragments
    #[error("empty content: {0}")]
    EmptyContent(String),

    /// Query text was blank
    #[error("query must not be empty")]
    EmptyQuery,

    /// Query against a store with no indexed documents
    #[error("no documents indexed")]
    NoDocuments,

    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Content extraction errors.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("extraction failed: {0}")]
    Failed(String),
}

/// Chunking errors.
#[derive(Error, Debug)]
pub enum ChunkError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Embedding errors.
#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("inference failed: {0}")]
    Inference(String),

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Vector store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("refusing to append an empty fragment batch for {0}")]
    EmptyAppend(String),

    #[error("insert failed: {0}")]
    Insert(String),
}

/// Answer-generation backend errors.
///
/// These never surface past the composer: every variant is recovered by
/// falling back to the extractive path.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("no generation backend configured")]
    NotConfigured,

    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("generation timed out after {0}s")]
    Timeout(u64),
}

/// Result type alias for docrag operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_unsupported_type_display() {
        let err = ExtractError::UnsupportedType("docx".to_string());
        assert_eq!(err.to_string(), "unsupported file type: docx");
    }

    #[test]
    fn test_extract_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExtractError = io_err.into();
        assert!(matches!(err, ExtractError::Io(_)));
    }

    #[test]
    fn test_chunk_error_invalid_config_display() {
        let err = ChunkError::InvalidConfig("overlap too large".to_string());
        assert_eq!(err.to_string(), "invalid configuration: overlap too large");
    }

    #[test]
    fn test_embed_error_dimension_mismatch_display() {
        let err = EmbedError::DimensionMismatch {
            expected: 384,
            actual: 768,
        };
        assert_eq!(
            err.to_string(),
            "dimension mismatch: expected 384, got 768"
        );
    }

    #[test]
    fn test_store_error_empty_append_display() {
        let err = StoreError::EmptyAppend("report.pdf".to_string());
        assert!(err.to_string().contains("report.pdf"));
    }

    #[test]
    fn test_generate_error_not_configured_display() {
        let err = GenerateError::NotConfigured;
        assert_eq!(err.to_string(), "no generation backend configured");
    }

    #[test]
    fn test_generate_error_status_display() {
        let err = GenerateError::Status {
            status: 429,
            body: "rate limited".to_string(),
        };
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn test_generate_error_timeout_display() {
        let err = GenerateError::Timeout(30);
        assert_eq!(err.to_string(), "generation timed out after 30s");
    }

    #[test]
    fn test_error_from_extract_error() {
        let extract_err = ExtractError::Parse("bad pdf".to_string());
        let err: Error = extract_err.into();
        assert!(matches!(err, Error::Extraction(_)));
        assert!(err.to_string().contains("bad pdf"));
    }

    #[test]
    fn test_error_from_chunk_error() {
        let chunk_err = ChunkError::InvalidConfig("zero size".to_string());
        let err: Error = chunk_err.into();
        assert!(matches!(err, Error::Chunking(_)));
    }

    #[test]
    fn test_error_from_embed_error() {
        let embed_err = EmbedError::Inference("backend down".to_string());
        let err: Error = embed_err.into();
        assert!(matches!(err, Error::Embedding(_)));
    }

    #[test]
    fn test_error_from_store_error() {
        let store_err = StoreError::EmptyAppend("x".to_string());
        let err: Error = store_err.into();
        assert!(matches!(err, Error::Store(_)));
    }

    #[test]
    fn test_error_empty_query_display() {
        assert_eq!(Error::EmptyQuery.to_string(), "query must not be empty");
    }

    #[test]
    fn test_error_no_documents_display() {
        assert_eq!(Error::NoDocuments.to_string(), "no documents indexed");
    }

    #[test]
    fn test_error_empty_content_display() {
        let err = Error::EmptyContent("document appears to be empty".to_string());
        assert!(err.to_string().starts_with("empty content"));
    }

    #[test]
    fn test_result_type_alias() {
        fn ok_fn() -> Result<u8> {
            Ok(1)
        }
        fn err_fn() -> Result<u8> {
            Err(Error::EmptyQuery)
        }

        assert!(ok_fn().is_ok());
        assert!(err_fn().is_err());
    }
}
