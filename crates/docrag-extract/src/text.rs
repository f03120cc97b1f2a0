//! Plain-text content extractor.

use async_trait::async_trait;
use docrag_core::{ContentExtractor, ExtractError};
use std::path::Path;
use tokio::fs;

/// Extractor for plain-text files.
///
/// Reads the file as UTF-8, replacing invalid sequences rather than failing:
/// uploads are frequently exported with mixed encodings and a lossy read
/// still yields searchable text.
pub struct TextExtractor;

impl TextExtractor {
    /// Create a new text extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentExtractor for TextExtractor {
    fn extensions(&self) -> &[&str] {
        &["txt", "md", "markdown", "text", "log", "csv"]
    }

    async fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = fs::read(path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_can_extract_txt() {
        let extractor = TextExtractor::new();
        assert!(extractor.can_extract(Path::new("/tmp/notes.txt")));
        assert!(extractor.can_extract(Path::new("/tmp/README.md")));
        assert!(extractor.can_extract(Path::new("/tmp/UPPER.TXT")));
    }

    #[test]
    fn test_cannot_extract_pdf_or_binary() {
        let extractor = TextExtractor::new();
        assert!(!extractor.can_extract(Path::new("/tmp/report.pdf")));
        assert!(!extractor.can_extract(Path::new("/tmp/image.png")));
        assert!(!extractor.can_extract(Path::new("/tmp/noextension")));
    }

    #[tokio::test]
    async fn test_extract_reads_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        std::fs::write(&path, "Hello, docrag!").unwrap();

        let extractor = TextExtractor::new();
        let text = extractor.extract(&path).await.unwrap();

        assert_eq!(text, "Hello, docrag!");
    }

    #[tokio::test]
    async fn test_extract_lossy_on_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mixed.txt");
        std::fs::write(&path, [b'o', b'k', 0xFF, b'!']).unwrap();

        let extractor = TextExtractor::new();
        let text = extractor.extract(&path).await.unwrap();

        assert!(text.starts_with("ok"));
        assert!(text.ends_with('!'));
    }

    #[tokio::test]
    async fn test_extract_missing_file_is_io_error() {
        let extractor = TextExtractor::new();
        let err = extractor
            .extract(Path::new("/nonexistent/never.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
