//! Brute-force cosine ranking over the full fragment set.
//!
//! An exhaustive O(N·D) scan per query. At the single-session scale this
//! system targets there is no approximate index; every fragment is scored.

use docrag_core::{Fragment, RetrievalResult};

/// Cosine similarity between two vectors.
///
/// Returns 0.0 when the vectors differ in length or either has zero
/// magnitude; cosine similarity is undefined for the zero vector and a
/// degenerate embedding must not bring down the ranking pass.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Rank `fragments` against `query` and return the top `top_k`.
///
/// Results are ordered by similarity descending; ties keep the fragments'
/// insertion order (the sort is stable), so repeated queries against an
/// unmodified store return identical orderings. Returns
/// `min(top_k, fragments.len())` results; an empty fragment set yields an
/// empty ranking, which the caller treats as "no information found" rather
/// than an error.
#[must_use]
pub fn rank(query: &[f32], fragments: &[Fragment], top_k: usize) -> Vec<RetrievalResult> {
    let mut scored: Vec<(f32, &Fragment)> = fragments
        .iter()
        .map(|fragment| (cosine_similarity(query, &fragment.embedding), fragment))
        .collect();

    // Stable: equal scores stay in insertion order.
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    scored
        .into_iter()
        .take(top_k)
        .map(|(similarity, fragment)| RetrievalResult {
            fragment_id: fragment.id,
            source_name: fragment.document_name.clone(),
            text: fragment.text.clone(),
            similarity,
        })
        .collect()
}
