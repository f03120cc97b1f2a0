//! PDF content extractor.
//!
//! Uses pdf-extract for the text layer; scanned PDFs without one produce an
//! empty string, which the engine rejects as empty content.

use async_trait::async_trait;
use docrag_core::{ContentExtractor, ExtractError};
use std::path::Path;
use tracing::debug;

/// Extractor for PDF files.
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new PDF extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentExtractor for PdfExtractor {
    fn extensions(&self) -> &[&str] {
        &["pdf"]
    }

    async fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        debug!("Extracting PDF: {:?}", path);

        let bytes = tokio::fs::read(path).await?;

        // pdf-extract is CPU-bound and synchronous
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes)
                .map_err(|e| ExtractError::Parse(e.to_string()))
        })
        .await
        .map_err(|e| ExtractError::Failed(format!("task join error: {e}")))??;

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_extract_pdf_only() {
        let extractor = PdfExtractor::new();
        assert!(extractor.can_extract(Path::new("/tmp/report.pdf")));
        assert!(extractor.can_extract(Path::new("/tmp/REPORT.PDF")));
        assert!(!extractor.can_extract(Path::new("/tmp/notes.txt")));
    }

    #[tokio::test]
    async fn test_extract_missing_file_is_io_error() {
        let extractor = PdfExtractor::new();
        let err = extractor
            .extract(Path::new("/nonexistent/never.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }

    #[tokio::test]
    async fn test_extract_garbage_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let extractor = PdfExtractor::new();
        let err = extractor.extract(&path).await.unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }
}
