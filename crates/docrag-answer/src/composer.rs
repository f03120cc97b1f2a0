//! Grounded answer composition and confidence scoring.

use docrag_core::{AnswerBackend, GenerateError, RetrievalResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Fixed answer when retrieval came back empty.
pub const NO_MATCH_ANSWER: &str = "No relevant information found in the indexed documents.";

/// Per-rank weights for the confidence average, rank 1 first.
const CONFIDENCE_WEIGHTS: [f32; 5] = [1.0, 0.8, 0.6, 0.4, 0.2];
/// Top-result similarity above which confidence gets boosted.
const HIGH_CONFIDENCE_THRESHOLD: f32 = 0.7;
/// Boost factor for a very strong top match.
const HIGH_CONFIDENCE_BOOST: f32 = 1.15;
/// Confidence never reaches certainty.
const CONFIDENCE_CAP: f32 = 0.99;

/// Configuration for answer composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Fragments used as grounding context
    pub context_fragments: usize,
    /// Per-fragment preview length in characters
    pub preview_chars: usize,
    /// Upper bound on one generation attempt
    pub generation_timeout: Duration,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            context_fragments: 3,
            preview_chars: 400,
            generation_timeout: Duration::from_secs(30),
        }
    }
}

/// A composed answer with its confidence and source attribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposedAnswer {
    /// Answer text, never empty
    pub answer: String,
    /// Confidence in [0.0, 0.99]
    pub confidence: f32,
    /// Distinct source document names among the grounding context
    pub sources: Vec<String>,
}

/// Builds grounded answers from retrieval results.
///
/// Holds no state between calls. The backend is consulted once per call with
/// a bounded timeout; any failure, including a timeout or the backend simply
/// not being configured, falls through to the extractive path.
pub struct AnswerComposer {
    backend: Arc<dyn AnswerBackend>,
    config: ComposerConfig,
}

impl AnswerComposer {
    /// Create a composer over the given backend capability.
    pub fn new(backend: Arc<dyn AnswerBackend>, config: ComposerConfig) -> Self {
        Self { backend, config }
    }

    /// Compose an answer for `query` from its ranked `results`.
    pub async fn compose(&self, query: &str, results: &[RetrievalResult]) -> ComposedAnswer {
        if results.is_empty() {
            return ComposedAnswer {
                answer: NO_MATCH_ANSWER.to_string(),
                confidence: 0.0,
                sources: Vec::new(),
            };
        }

        let context = &results[..self.config.context_fragments.min(results.len())];

        let prompt = self.build_prompt(query, context);
        let answer = match tokio::time::timeout(
            self.config.generation_timeout,
            self.backend.generate(&prompt),
        )
        .await
        {
            Ok(Ok(text)) if !text.trim().is_empty() => text,
            Ok(Ok(_)) => {
                warn!(
                    "Backend '{}' returned an empty answer, using extractive fallback",
                    self.backend.name()
                );
                self.extractive_answer(query, context)
            }
            Ok(Err(GenerateError::NotConfigured)) => {
                debug!("No generation backend configured, using extractive answer");
                self.extractive_answer(query, context)
            }
            Ok(Err(e)) => {
                warn!(
                    "Backend '{}' failed ({e}), using extractive fallback",
                    self.backend.name()
                );
                self.extractive_answer(query, context)
            }
            Err(_) => {
                warn!(
                    "Backend '{}' timed out after {:?}, using extractive fallback",
                    self.backend.name(),
                    self.config.generation_timeout
                );
                self.extractive_answer(query, context)
            }
        };

        let sources: BTreeSet<String> = context.iter().map(|r| r.source_name.clone()).collect();

        ComposedAnswer {
            answer,
            confidence: confidence(results),
            sources: sources.into_iter().collect(),
        }
    }

    /// Single instruction prompt embedding the truncated context.
    fn build_prompt(&self, query: &str, context: &[RetrievalResult]) -> String {
        let blocks: Vec<String> = context
            .iter()
            .map(|r| {
                format!(
                    "[{}]: {}",
                    r.source_name,
                    truncate_preview(&r.text, self.config.preview_chars)
                )
            })
            .collect();

        format!(
            "Answer the question using these documents.\n\n\
             Context:\n{}\n\n\
             Question: {query}\n\n\
             Answer briefly and clearly based on the context above.",
            blocks.join("\n\n")
        )
    }

    /// Answer synthesized directly from the grounding context.
    ///
    /// Never fails and never produces an empty answer for a non-empty
    /// context.
    fn extractive_answer(&self, query: &str, context: &[RetrievalResult]) -> String {
        let mut parts = vec![format!(
            "Based on your documents, here's what I found regarding: '{query}'\n"
        )];

        for result in context {
            let relevance = result.similarity * 100.0;
            parts.push(format!(
                "\nFrom '{}' ({relevance:.0}% relevant):\n{}\n",
                result.source_name,
                truncate_preview(&result.text, self.config.preview_chars)
            ));
        }

        parts.concat()
    }
}

/// Weighted-average confidence over up to the top 5 results.
///
/// Weights 1.0/0.8/0.6/0.4/0.2 by rank, normalized by the weights actually
/// used; a top similarity above 0.7 scales the average by 1.15. The result
/// is clamped to [0.0, 0.99] and is 0.0 exactly when `results` is empty.
#[must_use]
pub fn confidence(results: &[RetrievalResult]) -> f32 {
    if results.is_empty() {
        return 0.0;
    }

    let used = results.len().min(CONFIDENCE_WEIGHTS.len());
    let weighted: f32 = results[..used]
        .iter()
        .zip(CONFIDENCE_WEIGHTS.iter())
        .map(|(r, w)| r.similarity * w)
        .sum();
    let weight_sum: f32 = CONFIDENCE_WEIGHTS[..used].iter().sum();

    let mut value = weighted / weight_sum;

    if results[0].similarity > HIGH_CONFIDENCE_THRESHOLD {
        value *= HIGH_CONFIDENCE_BOOST;
    }

    value.clamp(0.0, CONFIDENCE_CAP)
}

/// Truncate on a character boundary, marking elided text with an ellipsis.
fn truncate_preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{truncated}...")
}
