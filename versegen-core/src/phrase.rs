//! Themed phrase composition around a user-chosen seed word.
//!
//! The composer looks at what the corpus says can follow the seed word,
//! sorts those candidates into grammatical buckets through an external
//! classifier, and assembles a short adjective-noun-verb phrase. It is
//! a best-effort heuristic: a role with no classified candidate is
//! simply left out.

use rand::Rng;

use crate::error::Result;
use crate::model::language_model::{LanguageModel, weighted_sample};
use crate::model::ngram::TokenCounts;
use crate::token;

/// Grammatical role of a vocabulary word, as reported by a classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordRole {
	Noun,
	Verb,
	Adjective,
	/// Anything the classifier cannot place; ignored when bucketing
	/// candidates, treated as a noun when it is the seed word itself.
	Other,
}

/// Part-of-speech lookup, supplied by the caller.
///
/// The composer only ever asks for single words and expects an answer
/// for every input; unknown words should map to [`WordRole::Other`].
pub trait RoleClassifier {
	fn role_of(&self, word: &str) -> WordRole;
}

/// Builds a short themed phrase around `seed_word`.
///
/// # Behavior
/// - Fetches the candidate distribution for the one-token context
///   `[seed_word]` through the usual backoff chain.
/// - Buckets the candidates by role, skipping sentinels and anything
///   classified [`WordRole::Other`].
/// - The seed word claims the slot matching its own role (adjective or
///   verb; everything else counts as a noun), then each remaining slot
///   is filled by a weighted draw from its bucket when possible.
/// - The filled slots are joined in adjective-noun-verb order and the
///   first letter is capitalized.
///
/// # Errors
/// Returns [`crate::error::ModelError::Untrained`] when the model has
/// never been trained; an unclassifiable neighbourhood is not an error.
pub fn compose_phrase<C, R>(
	model: &LanguageModel,
	seed_word: &str,
	classifier: &C,
	rng: &mut R,
) -> Result<String>
where
	C: RoleClassifier + ?Sized,
	R: Rng + ?Sized,
{
	let context = [seed_word.to_owned()];
	let counter = model.select_model(&context)?;
	let candidates = counter.candidates(&context)?;

	let mut nouns = TokenCounts::new();
	let mut verbs = TokenCounts::new();
	let mut adjectives = TokenCounts::new();
	for (word, &count) in candidates {
		if token::is_sentinel(word) {
			continue;
		}
		match classifier.role_of(word) {
			WordRole::Noun => {
				nouns.insert(word.clone(), count);
			}
			WordRole::Verb => {
				verbs.insert(word.clone(), count);
			}
			WordRole::Adjective => {
				adjectives.insert(word.clone(), count);
			}
			WordRole::Other => {}
		}
	}

	let mut adjective = None;
	let mut noun = None;
	let mut verb = None;
	match classifier.role_of(seed_word) {
		WordRole::Adjective => adjective = Some(seed_word.to_owned()),
		WordRole::Verb => verb = Some(seed_word.to_owned()),
		WordRole::Noun | WordRole::Other => noun = Some(seed_word.to_owned()),
	}

	if adjective.is_none() {
		adjective = weighted_sample(rng, &adjectives).map(str::to_owned);
	}
	if noun.is_none() {
		noun = weighted_sample(rng, &nouns).map(str::to_owned);
	}
	if verb.is_none() {
		verb = weighted_sample(rng, &verbs).map(str::to_owned);
	}

	let words: Vec<&str> = [adjective.as_deref(), noun.as_deref(), verb.as_deref()]
		.into_iter()
		.flatten()
		.collect();
	Ok(capitalize_first(&words.join(" ")))
}

/// Uppercases the first character of `text`, leaving the rest as-is.
pub fn capitalize_first(text: &str) -> String {
	let mut chars = text.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::token::{END, START_INNER, START_OUTER};
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	struct FixtureClassifier;

	impl RoleClassifier for FixtureClassifier {
		fn role_of(&self, word: &str) -> WordRole {
			match word {
				"fox" | "dog" | "night" => WordRole::Noun,
				"runs" | "sleeps" => WordRole::Verb,
				"brown" | "lazy" => WordRole::Adjective,
				_ => WordRole::Other,
			}
		}
	}

	fn sentence(tokens: &[&str]) -> Vec<String> {
		tokens.iter().map(|t| (*t).to_owned()).collect()
	}

	#[test]
	fn noun_seed_gains_a_verb() {
		let mut model = LanguageModel::new();
		model.train(&[
			sentence(&[START_OUTER, START_INNER, "fox", "runs", END]),
			sentence(&[START_OUTER, START_INNER, "fox", "sleeps", END]),
		]);
		let mut rng = StdRng::seed_from_u64(11);
		let phrase = compose_phrase(&model, "fox", &FixtureClassifier, &mut rng).unwrap();
		assert!(phrase == "Fox runs" || phrase == "Fox sleeps", "got {phrase}");
	}

	#[test]
	fn adjective_seed_keeps_its_slot() {
		let mut model = LanguageModel::new();
		model.train(&[sentence(&[START_OUTER, START_INNER, "brown", "fox", END])]);
		let mut rng = StdRng::seed_from_u64(2);
		let phrase = compose_phrase(&model, "brown", &FixtureClassifier, &mut rng).unwrap();
		assert_eq!(phrase, "Brown fox");
	}

	#[test]
	fn unseen_seed_falls_back_to_unigram_neighbours() {
		let mut model = LanguageModel::new();
		model.train(&[sentence(&[START_OUTER, START_INNER, "brown", "fox", "runs", END])]);
		// "moon" has no bigram context, so the unigram supplies one
		// candidate per role and the result is fully determined.
		let mut rng = StdRng::seed_from_u64(7);
		let phrase = compose_phrase(&model, "moon", &FixtureClassifier, &mut rng).unwrap();
		assert_eq!(phrase, "Brown moon runs");
	}

	#[test]
	fn unclassifiable_neighbourhood_yields_the_bare_seed() {
		let mut model = LanguageModel::new();
		model.train(&[sentence(&[START_OUTER, START_INNER, "blip", "blop", END])]);
		let mut rng = StdRng::seed_from_u64(4);
		let phrase = compose_phrase(&model, "blip", &FixtureClassifier, &mut rng).unwrap();
		assert_eq!(phrase, "Blip");
	}

	#[test]
	fn untrained_model_is_refused() {
		let model = LanguageModel::new();
		let mut rng = StdRng::seed_from_u64(1);
		assert!(compose_phrase(&model, "fox", &FixtureClassifier, &mut rng).is_err());
	}

	#[test]
	fn capitalize_first_handles_edge_shapes() {
		assert_eq!(capitalize_first(""), "");
		assert_eq!(capitalize_first("fox"), "Fox");
		assert_eq!(capitalize_first("Fox"), "Fox");
		assert_eq!(capitalize_first("élan vital"), "Élan vital");
	}
}
