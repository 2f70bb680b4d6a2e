//! N-gram-based lyric generation library.
//!
//! This crate provides a small statistical generation system including:
//! - Order-parameterized n-gram counters behind a backoff selection chain
//! - Weighted-random next-token sampling with caller-injected randomness
//! - Line generation with Gaussian length control, seed-phrase echoing
//!   and rhyme-constrained endings
//! - Themed phrase composition and verse/song assembly
//!
//! Corpus preparation, rhyme dictionaries and part-of-speech lookup are
//! collaborator concerns: the caller hands in sentinel-bounded token
//! sentences and implementations of the lookup traits.

/// Sentinel tokens marking sentence boundaries.
pub mod token;

/// Typed errors for contract violations.
pub mod error;

/// N-gram counters and the backoff language model.
pub mod model;

/// Token-by-token line generation.
pub mod generate;

/// Themed phrase composition around a seed word.
pub mod phrase;

/// Verse and song assembly.
pub mod song;
