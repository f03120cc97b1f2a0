//! # docrag-answer
//!
//! Answer composition for docrag.
//!
//! Given the ranked fragments for a query, the [`AnswerComposer`] produces a
//! grounded answer one of two ways:
//!
//! - **Generation path**: a configured [`AnswerBackend`] receives a single
//!   instruction prompt embedding the truncated grounding context and the
//!   query, with a bounded timeout and no retries.
//! - **Extractive path**: when no backend is configured or the one attempt
//!   fails for any reason, the answer is synthesized directly from the top
//!   fragments with per-source attribution. This path never fails.
//!
//! Backend failures are values, not exceptions: the fallback is a visible
//! branch in [`AnswerComposer::compose`], and nothing past the composer ever
//! sees a [`GenerateError`](docrag_core::GenerateError).

pub mod backend;
pub mod composer;

pub use backend::{HttpBackend, NullBackend};
pub use composer::{confidence, AnswerComposer, ComposedAnswer, ComposerConfig, NO_MATCH_ANSWER};
