//! Overlapping word-window chunker.

use docrag_core::{ChunkError, ChunkParams};

/// Splits text into overlapping fixed-size word windows.
///
/// The text is tokenized on whitespace and windows of `chunk_size` words are
/// taken every `chunk_size - overlap` words, so consecutive fragments share
/// `overlap` words of context. A stateless, pure function of its input: the
/// same text always yields the same fragments.
///
/// # Example
///
/// ```rust
/// use docrag_chunker::WordChunker;
/// use docrag_core::ChunkParams;
///
/// let chunker = WordChunker::new(ChunkParams::new(4, 1).unwrap());
/// let fragments = chunker.chunk("one two three four five six");
///
/// assert_eq!(fragments, vec!["one two three four", "four five six"]);
/// ```
#[derive(Debug, Clone)]
pub struct WordChunker {
    params: ChunkParams,
}

impl WordChunker {
    /// Create a chunker with the given validated parameters.
    #[must_use]
    pub fn new(params: ChunkParams) -> Self {
        Self { params }
    }

    /// Create a chunker, validating the raw parameters first.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] when `chunk_size` is zero or
    /// `overlap >= chunk_size`.
    pub fn with_sizes(chunk_size: usize, overlap: usize) -> Result<Self, ChunkError> {
        Ok(Self::new(ChunkParams::new(chunk_size, overlap)?))
    }

    /// The parameters this chunker was built with.
    #[must_use]
    pub fn params(&self) -> ChunkParams {
        self.params
    }

    /// Split `text` into overlapping fragments.
    ///
    /// Whitespace-only input yields no fragments. Text shorter than the
    /// window yields exactly one fragment holding every word.
    #[must_use]
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }

        let mut fragments = Vec::new();
        for start in (0..words.len()).step_by(self.params.step()) {
            let end = (start + self.params.chunk_size()).min(words.len());
            fragments.push(words[start..end].join(" "));
        }

        fragments
    }
}

impl Default for WordChunker {
    fn default() -> Self {
        Self::new(ChunkParams::default())
    }
}
