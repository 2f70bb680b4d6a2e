use std::collections::{BTreeMap, HashMap};

use crate::error::{ModelError, Result};
use crate::token::{START_INNER, START_OUTER};

/// Occurrence counts for the tokens observed after one context.
///
/// Ordered so that iteration — and therefore cumulative-sum sampling —
/// is stable across runs. Every stored count is at least 1; an empty
/// table is never stored.
pub type TokenCounts = BTreeMap<String, usize>;

/// A fixed-order n-gram frequency model over word tokens.
///
/// The model stores, for every `order - 1` token context seen during
/// training, how often each token followed it. An order of 1 degenerates
/// to a plain vocabulary count with an empty context.
///
/// # Responsibilities
/// - Accumulate (context → next token) counts from prepared sentences
/// - Report whether a continuation exists for a given token history
/// - Hand out the candidate table for a known context
///
/// # Invariants
/// - `order` is always >= 1
/// - Every stored context has exactly `order - 1` tokens
/// - Every candidate table is non-empty and every count is >= 1
/// - The order-1 model never counts the two start sentinels
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NGramModel {
	/// Number of tokens in one full n-gram (context plus continuation).
	order: usize,

	/// Mapping from an (order - 1)-token context to its candidate table.
	/// The order-1 model keeps its single table under the empty context.
	contexts: HashMap<Vec<String>, TokenCounts>,
}

impl NGramModel {
	/// Creates an empty model of the given order.
	///
	/// # Panics
	/// Panics if `order` is 0; a zero-length window counts nothing.
	pub fn new(order: usize) -> Self {
		assert!(order >= 1, "n-gram order must be at least 1");
		Self { order, contexts: HashMap::new() }
	}

	/// The order this model was created with.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct (context, next token) pairs seen so far.
	///
	/// Useful when printing training summaries.
	pub fn path_count(&self) -> usize {
		self.contexts.values().map(TokenCounts::len).sum()
	}

	/// Ingests a corpus of prepared sentences.
	///
	/// Every sliding window of `order` tokens increments the count of its
	/// final token under the preceding context, creating entries on first
	/// sight. Repeated calls accumulate; an empty corpus changes nothing.
	///
	/// # Notes
	/// - Sentences shorter than `order` contribute no windows.
	/// - The order-1 model skips the two start sentinels, so they can
	///   never be sampled out of the fallback vocabulary. The terminator
	///   is counted like any other token.
	pub fn train(&mut self, corpus: &[Vec<String>]) {
		for sentence in corpus {
			for window in sentence.windows(self.order) {
				let (context, next) = window.split_at(self.order - 1);
				let next = next[0].as_str();
				if self.order == 1 && (next == START_OUTER || next == START_INNER) {
					continue;
				}
				let counts = self.contexts.entry(context.to_vec()).or_default();
				*counts.entry(next.to_owned()).or_insert(0) += 1;
			}
		}
	}

	/// Returns true when this model can pick a continuation for the
	/// given token history.
	///
	/// For order >= 2 that means the trailing `order - 1` tokens of
	/// `recent` were seen as a context during training. The order-1
	/// model answers true as soon as it holds any count at all,
	/// whatever `recent` contains.
	pub fn has_continuation(&self, recent: &[String]) -> bool {
		match self.trailing_context(recent) {
			Some(context) => self.contexts.contains_key(context),
			None => false,
		}
	}

	/// Returns the candidate table for the trailing context of `recent`.
	///
	/// The order-1 model returns its full vocabulary table and ignores
	/// `recent` entirely.
	///
	/// # Errors
	/// Returns [`ModelError::UnknownContext`] when `has_continuation`
	/// would answer false for the same input. Callers are expected to
	/// check first or go through the backoff selection.
	pub fn candidates(&self, recent: &[String]) -> Result<&TokenCounts> {
		self.trailing_context(recent)
			.and_then(|context| self.contexts.get(context))
			.ok_or_else(|| ModelError::UnknownContext { context: recent.to_vec() })
	}

	/// The trailing `order - 1` tokens of `recent`, or `None` when the
	/// history is too short to form a context.
	fn trailing_context<'a>(&self, recent: &'a [String]) -> Option<&'a [String]> {
		let wanted = self.order - 1;
		recent.len().checked_sub(wanted).map(|start| &recent[start..])
	}
}
