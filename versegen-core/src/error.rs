//! Error type shared by the model and generation layers.

/// Errors raised when a caller breaks the model contract.
///
/// Statistical emptiness is never an error: unknown contexts back off to
/// lower orders, degenerate rhyme filters fall back to the raw filter,
/// and an empty training corpus is a no-op. The variants below only
/// cover true precondition violations, which signal a bug in the caller
/// rather than a recoverable condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
	/// `candidates` was queried for a context that `has_continuation`
	/// would reject.
	#[error("no continuation recorded for context {context:?}")]
	UnknownContext {
		/// The trailing context tokens the lookup was attempted with.
		context: Vec<String>,
	},

	/// Selection, generation, or phrase composition was attempted before
	/// any training data was added.
	#[error("the language model has not been trained")]
	Untrained,
}

pub type Result<T> = std::result::Result<T, ModelError>;
