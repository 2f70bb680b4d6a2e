//! Token-by-token line generation.
//!
//! A line is produced by walking the backoff model from the sentinel
//! opening until either the terminator is drawn or a Gaussian stopping
//! rule fires. The working context keeps the two start markers as a
//! prefix for every lookup; the returned line never contains them.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::Result;
use crate::model::language_model::LanguageModel;
use crate::token::{self, END, line_opening};

/// A user-chosen seed word together with the themed phrase standing in
/// for it inside finished lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedPhrase {
	/// The bare word the model generates organically.
	pub word: String,
	/// The full phrase substituted for every occurrence of `word`.
	pub phrase: String,
}

impl SeedPhrase {
	pub fn new(word: &str, phrase: &str) -> Self {
		Self { word: word.to_owned(), phrase: phrase.to_owned() }
	}
}

/// How a generated line is seeded.
///
/// # Variants
/// - `None`: plain generation from the sentinel opening.
/// - `Echo(seed)`: generate plainly, then replace every token equal to
///   the seed word with the full phrase (exact match, not fuzzy).
/// - `Open(seed)`: plant the full phrase as the line's first token —
///   used for the boundary lines of a verse — and echo as well.
#[derive(Clone, Debug)]
pub enum LineSeed {
	None,
	Echo(SeedPhrase),
	Open(SeedPhrase),
}

/// Generates one line of roughly `desired_len` tokens.
///
/// # Behavior
/// - The working context starts as `[^::^, ^:::^]`, plus the planted
///   phrase for [`LineSeed::Open`].
/// - Each step first applies the stochastic stopping rule (a Gaussian
///   draw centred on the current emitted length, standard deviation 1,
///   compared against `desired_len`), then asks the model for the next
///   token. Drawing the terminator stops the line immediately; the
///   terminator itself is never stored.
/// - After the loop the seed word is echoed into the phrase, and, when
///   `rhyme_filter` is given and more than one token was emitted, the
///   final token is rewritten under the filter.
///
/// Over- and under-shooting `desired_len` is the intended randomness,
/// not an error; the returned line can even be empty when the opening
/// context draws the terminator straight away.
///
/// # Errors
/// Returns [`crate::error::ModelError::Untrained`] when the model has
/// never been trained.
pub fn generate_line<R: Rng + ?Sized>(
	model: &LanguageModel,
	desired_len: usize,
	seed: &LineSeed,
	rhyme_filter: Option<&[String]>,
	rng: &mut R,
) -> Result<Vec<String>> {
	let mut working = line_opening();
	if let LineSeed::Open(seed) = seed {
		working.push(seed.phrase.clone());
	}

	loop {
		let emitted = working.len() - 2;
		if too_long(rng, emitted, desired_len) {
			break;
		}
		let next = model.next_token(&working, None, rng)?;
		if next == END {
			break;
		}
		working.push(next);
	}

	// Drop the sentinel prefix; everything after it is the line.
	let mut line = working.split_off(2);
	log::trace!("emitted {} tokens toward desired length {desired_len}", line.len());

	match seed {
		LineSeed::None => {}
		LineSeed::Echo(seed) | LineSeed::Open(seed) => {
			for word in &mut line {
				if *word == seed.word {
					*word = seed.phrase.clone();
				}
			}
		}
	}

	if let Some(filter) = rhyme_filter {
		rewrite_ending(model, &mut line, filter, rng)?;
	}

	Ok(line)
}

/// Replaces the final token of `line` with one satisfying the rhyme
/// filter, querying the model against the truncated context.
///
/// Lines of one token or fewer are left alone. When the constrained
/// draw produces a sentinel, the original ending is retained so the
/// line cannot collapse or leak a marker.
fn rewrite_ending<R: Rng + ?Sized>(
	model: &LanguageModel,
	line: &mut Vec<String>,
	filter: &[String],
	rng: &mut R,
) -> Result<()> {
	if line.len() <= 1 {
		return Ok(());
	}
	let Some(dropped) = line.pop() else {
		return Ok(());
	};

	let mut context = line_opening();
	context.extend(line.iter().cloned());
	let replacement = model.next_token(&context, Some(filter), rng)?;

	if token::is_sentinel(&replacement) {
		line.push(dropped);
	} else {
		line.push(replacement);
	}
	Ok(())
}

/// The stochastic stopping rule: true when a Gaussian draw centred on
/// `current` (standard deviation 1) exceeds `desired`.
///
/// Lengths cluster around `desired` instead of being cut hard at it.
fn too_long<R: Rng + ?Sized>(rng: &mut R, current: usize, desired: usize) -> bool {
	let drift: f64 = rng.sample(StandardNormal);
	current as f64 + drift > desired as f64
}
