use std::fmt;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::{ModelError, Result};
use crate::model::ngram::{NGramModel, TokenCounts};
use crate::token::{self, END};

/// A backoff chain of n-gram models behind a single next-token oracle.
///
/// Holds the trigram, bigram, and unigram models in that fixed priority
/// order and always answers from the most specific one that knows the
/// current context. The unigram model ignores context, so once any
/// training has happened the chain can never run dry.
///
/// # Responsibilities
/// - Feed training corpora to every order at once
/// - Select the highest-order model with a continuation for a context
/// - Sample the next token, optionally restricted by a rhyme filter
///
/// # Invariants
/// - `models` is ordered by strictly descending order: 3, 2, 1
/// - Models are only mutated through [`LanguageModel::train`]
#[derive(Clone, Debug)]
pub struct LanguageModel {
	models: Vec<NGramModel>,
}

impl LanguageModel {
	/// Creates the untrained trigram / bigram / unigram chain.
	pub fn new() -> Self {
		Self {
			models: vec![NGramModel::new(3), NGramModel::new(2), NGramModel::new(1)],
		}
	}

	/// Ingests a corpus of prepared sentences into every order.
	///
	/// Additive: repeated calls accumulate counts rather than replace
	/// them. Training with an empty corpus is a no-op.
	pub fn train(&mut self, corpus: &[Vec<String>]) {
		for model in &mut self.models {
			model.train(corpus);
		}
		log::debug!(
			"trained on {} sentences, paths per order: {:?}",
			corpus.len(),
			self.models.iter().map(NGramModel::path_count).collect::<Vec<_>>()
		);
	}

	/// Returns the most specific model that has seen the trailing
	/// context of `recent`.
	///
	/// # Errors
	/// Returns [`ModelError::Untrained`] when even the unigram fallback
	/// is empty, which only happens before the first training call.
	pub fn select_model(&self, recent: &[String]) -> Result<&NGramModel> {
		self.models
			.iter()
			.find(|model| model.has_continuation(recent))
			.ok_or(ModelError::Untrained)
	}

	/// Produces the next token for the given history.
	///
	/// Without a filter this is a weighted draw over the selected
	/// model's candidates. With a filter, candidates are restricted to
	/// the allowed tokens — the three sentinels stay eligible so
	/// sentence boundaries remain reachable — and the restriction is
	/// sampled when non-empty. When the model has nothing compatible,
	/// the token is drawn uniformly from the raw filter instead, so a
	/// constrained line can always make progress.
	///
	/// An empty filter is not the same as no filter: it admits only
	/// sentinel candidates, and when none are recorded either, the
	/// terminator is returned so the caller can close the line.
	///
	/// # Errors
	/// Returns [`ModelError::Untrained`] when no training has happened.
	pub fn next_token<R: Rng + ?Sized>(
		&self,
		recent: &[String],
		filter: Option<&[String]>,
		rng: &mut R,
	) -> Result<String> {
		let model = self.select_model(recent)?;
		let candidates = model.candidates(recent)?;

		let Some(allowed) = filter else {
			// Stored tables are never empty, so this only fails when the
			// model holds no data at all.
			return weighted_sample(rng, candidates)
				.map(str::to_owned)
				.ok_or(ModelError::Untrained);
		};

		let restricted: TokenCounts = candidates
			.iter()
			.filter(|(candidate, _)| token::is_sentinel(candidate) || allowed.contains(candidate))
			.map(|(candidate, count)| (candidate.clone(), *count))
			.collect();

		if let Some(choice) = weighted_sample(rng, &restricted) {
			return Ok(choice.to_owned());
		}

		match allowed.choose(rng) {
			Some(choice) => Ok(choice.clone()),
			None => Ok(END.to_owned()),
		}
	}
}

impl Default for LanguageModel {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Display for LanguageModel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for model in &self.models {
			writeln!(f, "{}-gram model contains {} trained paths", model.order(), model.path_count())?;
		}
		Ok(())
	}
}

/// Draws one token from a candidate table, weighted by occurrence count.
///
/// Builds the cumulative sums over the table's iteration order, draws a
/// uniform integer below the total, and returns the first token whose
/// cumulative sum strictly exceeds the draw. The table is ordered, so a
/// seeded generator reproduces the same choice every run.
///
/// Returns `None` for an empty table.
pub fn weighted_sample<'a, R: Rng + ?Sized>(rng: &mut R, counts: &'a TokenCounts) -> Option<&'a str> {
	if counts.is_empty() {
		return None;
	}

	let total: usize = counts.values().sum();
	if total == 0 {
		// Stored counts are always >= 1; kept for hand-built tables.
		return None;
	}

	let mut cumulative = Vec::with_capacity(counts.len());
	let mut running = 0;
	for (candidate, count) in counts {
		running += count;
		cumulative.push((candidate.as_str(), running));
	}

	let draw = rng.random_range(0..total);
	for (candidate, bound) in cumulative {
		if bound > draw {
			return Some(candidate);
		}
	}

	counts.keys().next_back().map(String::as_str)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::token::{END, START_INNER, START_OUTER};
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn sentence(tokens: &[&str]) -> Vec<String> {
		tokens.iter().map(|t| (*t).to_owned()).collect()
	}

	fn trained_model() -> LanguageModel {
		let mut model = LanguageModel::new();
		model.train(&[
			sentence(&[START_OUTER, START_INNER, "the", "brown", "fox", END]),
			sentence(&[START_OUTER, START_INNER, "the", "lazy", "dog", END]),
		]);
		model
	}

	#[test]
	fn selection_prefers_the_most_specific_order() {
		let model = trained_model();

		// Full trigram context available.
		let selected = model.select_model(&sentence(&[START_INNER, "the"])).unwrap();
		assert_eq!(selected.order(), 3);

		// No trigram history for (unseen, the), but the bigram knows "the".
		let selected = model.select_model(&sentence(&["unseen", "the"])).unwrap();
		assert_eq!(selected.order(), 2);

		// Nothing matches: unigram fallback.
		let selected = model.select_model(&sentence(&["unseen", "words"])).unwrap();
		assert_eq!(selected.order(), 1);
	}

	#[test]
	fn selection_before_training_is_refused() {
		let model = LanguageModel::new();
		assert_eq!(model.select_model(&[]).unwrap_err(), ModelError::Untrained);

		let mut rng = StdRng::seed_from_u64(1);
		let err = model.next_token(&[], None, &mut rng).unwrap_err();
		assert_eq!(err, ModelError::Untrained);
	}

	#[test]
	fn weighted_sample_respects_count_proportions() {
		let mut counts = TokenCounts::new();
		counts.insert("a".to_owned(), 1);
		counts.insert("b".to_owned(), 3);

		let mut rng = StdRng::seed_from_u64(7);
		let draws = 100_000;
		let mut b_hits = 0usize;
		for _ in 0..draws {
			if weighted_sample(&mut rng, &counts) == Some("b") {
				b_hits += 1;
			}
		}

		let frequency = b_hits as f64 / draws as f64;
		assert!((0.73..0.77).contains(&frequency), "b drawn at {frequency}");
	}

	#[test]
	fn weighted_sample_edge_tables() {
		let mut rng = StdRng::seed_from_u64(7);
		assert_eq!(weighted_sample(&mut rng, &TokenCounts::new()), None);

		let mut single = TokenCounts::new();
		single.insert("only".to_owned(), 4);
		for _ in 0..16 {
			assert_eq!(weighted_sample(&mut rng, &single), Some("only"));
		}
	}

	#[test]
	fn unfiltered_tokens_come_from_the_model() {
		let model = trained_model();
		let mut rng = StdRng::seed_from_u64(11);
		let history = sentence(&[START_OUTER, START_INNER, "the"]);
		for _ in 0..32 {
			let next = model.next_token(&history, None, &mut rng).unwrap();
			assert!(next == "brown" || next == "lazy", "unexpected token {next}");
		}
	}

	#[test]
	fn filter_restricts_model_candidates() {
		let model = trained_model();
		let mut rng = StdRng::seed_from_u64(13);
		let history = sentence(&[START_OUTER, START_INNER, "the"]);
		let filter = sentence(&["lazy"]);
		for _ in 0..16 {
			let next = model.next_token(&history, Some(&filter), &mut rng).unwrap();
			assert_eq!(next, "lazy");
		}
	}

	#[test]
	fn disjoint_filter_falls_back_to_the_raw_filter() {
		let model = trained_model();
		let mut rng = StdRng::seed_from_u64(17);
		let history = sentence(&[START_OUTER, START_INNER, "the"]);
		let filter = sentence(&["purple", "orange"]);
		for _ in 0..32 {
			let next = model.next_token(&history, Some(&filter), &mut rng).unwrap();
			assert!(filter.contains(&next), "token {next} escaped the filter");
		}
	}

	#[test]
	fn sentinels_stay_eligible_under_any_filter() {
		let model = trained_model();
		let mut rng = StdRng::seed_from_u64(19);
		// After "fox" the only recorded continuation is the terminator.
		let history = sentence(&["brown", "fox"]);
		let filter = sentence(&["unrelated"]);
		let next = model.next_token(&history, Some(&filter), &mut rng).unwrap();
		assert_eq!(next, END);
	}

	#[test]
	fn empty_filter_closes_the_line() {
		let model = trained_model();
		let mut rng = StdRng::seed_from_u64(23);
		// "the" continues with words only, so an empty filter leaves
		// nothing but the terminator fallback.
		let history = sentence(&[START_OUTER, START_INNER, "the"]);
		let next = model.next_token(&history, Some(&[]), &mut rng).unwrap();
		assert_eq!(next, END);
	}

	#[test]
	fn display_reports_paths_per_order() {
		let model = trained_model();
		let report = model.to_string();
		assert!(report.contains("3-gram model contains"));
		assert!(report.contains("1-gram model contains"));
	}
}
