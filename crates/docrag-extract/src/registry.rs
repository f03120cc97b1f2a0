//! Extractor registry dispatching on file extension.

use docrag_core::{ContentExtractor, ExtractError};
use std::path::Path;
use std::sync::Arc;

/// Registry of content extractors.
///
/// Extractors are tried in registration order; the first one whose extension
/// list matches the file wins. Files no extractor claims are rejected with
/// [`ExtractError::UnsupportedType`], which the upload handler reports per
/// file without failing the rest of the batch.
pub struct ExtractorRegistry {
    extractors: Vec<Arc<dyn ContentExtractor>>,
}

impl ExtractorRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Create a registry with the standard adapters (text, PDF).
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(crate::TextExtractor::new());
        registry.register(crate::PdfExtractor::new());
        registry
    }

    /// Register an extractor.
    pub fn register<E: ContentExtractor + 'static>(&mut self, extractor: E) {
        self.extractors.push(Arc::new(extractor));
    }

    /// Get an extractor that can handle the given file, if any.
    #[must_use]
    pub fn get_for_file(&self, path: &Path) -> Option<Arc<dyn ContentExtractor>> {
        self.extractors
            .iter()
            .find(|e| e.can_extract(path))
            .cloned()
    }

    /// Whether any registered extractor handles the given file.
    #[must_use]
    pub fn supports(&self, path: &Path) -> bool {
        self.get_for_file(path).is_some()
    }

    /// Extract text from a file.
    pub async fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let extractor = self.get_for_file(path).ok_or_else(|| {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(none)");
            ExtractError::UnsupportedType(ext.to_string())
        })?;

        extractor.extract(path).await
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextExtractor;
    use tempfile::tempdir;

    #[test]
    fn test_new_registry_is_empty() {
        let registry = ExtractorRegistry::new();
        assert!(!registry.supports(Path::new("/tmp/notes.txt")));
    }

    #[test]
    fn test_with_defaults_supports_text_and_pdf() {
        let registry = ExtractorRegistry::with_defaults();
        assert!(registry.supports(Path::new("/tmp/notes.txt")));
        assert!(registry.supports(Path::new("/tmp/report.pdf")));
        assert!(!registry.supports(Path::new("/tmp/deck.pptx")));
    }

    #[test]
    fn test_get_for_file_matches_extension() {
        let mut registry = ExtractorRegistry::new();
        registry.register(TextExtractor::new());

        assert!(registry.get_for_file(Path::new("/tmp/a.txt")).is_some());
        assert!(registry.get_for_file(Path::new("/tmp/a.pdf")).is_none());
    }

    #[tokio::test]
    async fn test_extract_unsupported_type() {
        let registry = ExtractorRegistry::with_defaults();
        let err = registry
            .extract(Path::new("/tmp/archive.zip"))
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractError::UnsupportedType(_)));
        assert!(err.to_string().contains("zip"));
    }

    #[tokio::test]
    async fn test_extract_dispatches_to_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "# Heading\n\nBody text.").unwrap();

        let registry = ExtractorRegistry::with_defaults();
        let text = registry.extract(&path).await.unwrap();

        assert!(text.contains("Body text."));
    }
}
