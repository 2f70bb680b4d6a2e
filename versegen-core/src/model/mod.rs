//! The statistical model layer.
//!
//! Two pieces live here:
//! - Fixed-order counting models (`NGramModel`)
//! - The backoff chain and sampling oracle (`LanguageModel`)
//!
//! Everything above this layer (line generation, phrase composition,
//! verse assembly) treats `LanguageModel` as its only entry point.

/// Fixed-order n-gram frequency model.
///
/// Handles corpus ingestion, continuation checks, and candidate-table
/// lookups for one order.
pub mod ngram;

/// Backoff model selection and weighted next-token sampling.
///
/// Combines the three orders behind one oracle and applies optional
/// rhyme filters with their fallback chain.
pub mod language_model;
