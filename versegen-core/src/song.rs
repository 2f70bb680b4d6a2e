//! Verse and song assembly on top of line generation.
//!
//! A verse is an ordered list of finished lines; a song is the usual
//! verse-chorus-verse-chorus arrangement. The rhymed verse follows a
//! fixed six-line scheme: a phrase-opened boundary line, two free lines
//! with rhymable endings, two lines rhyme-filtered against those
//! endings, and a closing boundary line.

use std::fmt;

use rand::Rng;

use crate::error::Result;
use crate::generate::{LineSeed, SeedPhrase, generate_line};
use crate::model::language_model::LanguageModel;
use crate::phrase::capitalize_first;

/// Desired token length for verse lines.
pub const VERSE_LINE_LEN: usize = 7;
/// Desired token length for chorus lines.
pub const CHORUS_LINE_LEN: usize = 9;

/// Lines per song section.
const SECTION_LINES: usize = 4;
/// Attempts at a rhymable ending before accepting the line as-is.
const RHYMABLE_TRIES: usize = 16;

/// Rhyme dictionary, supplied by the caller.
///
/// An empty answer means no rhyme is known for the word; the assembly
/// code treats that as "no constraint enforceable", never as an error.
pub trait RhymeLookup {
	fn rhymes_of(&self, word: &str) -> Vec<String>;
}

/// One assembled stanza.
///
/// Rendering capitalizes each line's first letter and joins tokens with
/// single spaces, one line per row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Verse {
	lines: Vec<Vec<String>>,
}

impl Verse {
	pub fn lines(&self) -> &[Vec<String>] {
		&self.lines
	}
}

impl fmt::Display for Verse {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for line in &self.lines {
			writeln!(f, "{}", capitalize_first(&line.join(" ")))?;
		}
		Ok(())
	}
}

/// A full song.
///
/// Rendering prints verse one, the chorus, verse two, then the chorus
/// again, with a blank row between sections.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Song {
	pub verse_one: Verse,
	pub chorus: Verse,
	pub verse_two: Verse,
}

impl fmt::Display for Song {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}\n{}\n{}\n{}", self.verse_one, self.chorus, self.verse_two, self.chorus)
	}
}

/// Builds the six-line rhymed verse around a seed phrase.
///
/// # Behavior
/// - Lines 1 and 6 are boundary lines opening with the full phrase.
/// - Lines 2 and 3 are free lines regenerated until the rhyme lookup
///   knows their final word, up to a fixed retry cap; past the cap the
///   last attempt is accepted and its pair goes unconstrained.
/// - Lines 4 and 5 are generated under the rhyme filters collected from
///   lines 2 and 3 respectively.
/// - Every line echoes the seed word into the full phrase.
///
/// # Errors
/// Returns [`crate::error::ModelError::Untrained`] when the model has
/// never been trained.
pub fn rhymed_verse<L, R>(
	model: &LanguageModel,
	seed: &SeedPhrase,
	rhymes: &L,
	rng: &mut R,
) -> Result<Verse>
where
	L: RhymeLookup + ?Sized,
	R: Rng + ?Sized,
{
	let open = LineSeed::Open(seed.clone());
	let echo = LineSeed::Echo(seed.clone());

	let mut lines = Vec::with_capacity(6);
	lines.push(generate_line(model, VERSE_LINE_LEN, &open, None, rng)?);

	let (line_a, rhymes_a) = rhymable_line(model, &echo, rhymes, rng)?;
	let (line_b, rhymes_b) = rhymable_line(model, &echo, rhymes, rng)?;
	lines.push(line_a);
	lines.push(line_b);

	let filter_a = (!rhymes_a.is_empty()).then_some(rhymes_a.as_slice());
	lines.push(generate_line(model, VERSE_LINE_LEN, &echo, filter_a, rng)?);
	let filter_b = (!rhymes_b.is_empty()).then_some(rhymes_b.as_slice());
	lines.push(generate_line(model, VERSE_LINE_LEN, &echo, filter_b, rng)?);

	lines.push(generate_line(model, VERSE_LINE_LEN, &open, None, rng)?);
	Ok(Verse { lines })
}

/// Generates a line whose final word the rhyme lookup can pair, along
/// with that rhyme set. Capped retries; empty lines count as failures.
fn rhymable_line<L, R>(
	model: &LanguageModel,
	seed: &LineSeed,
	rhymes: &L,
	rng: &mut R,
) -> Result<(Vec<String>, Vec<String>)>
where
	L: RhymeLookup + ?Sized,
	R: Rng + ?Sized,
{
	let mut line = Vec::new();
	let mut rhyme_set = Vec::new();
	for attempt in 1..=RHYMABLE_TRIES {
		line = generate_line(model, VERSE_LINE_LEN, seed, None, rng)?;
		rhyme_set = match line.last() {
			Some(word) => rhymes.rhymes_of(word),
			None => Vec::new(),
		};
		if !rhyme_set.is_empty() {
			break;
		}
		log::debug!(
			"no rhyme for line ending {:?}, attempt {attempt}/{RHYMABLE_TRIES}",
			line.last()
		);
	}
	Ok((line, rhyme_set))
}

/// Builds an unseeded section of `line_count` lines.
pub fn plain_verse<R: Rng + ?Sized>(
	model: &LanguageModel,
	line_count: usize,
	desired_len: usize,
	rng: &mut R,
) -> Result<Verse> {
	let mut lines = Vec::with_capacity(line_count);
	for _ in 0..line_count {
		lines.push(generate_line(model, desired_len, &LineSeed::None, None, rng)?);
	}
	Ok(Verse { lines })
}

/// Composes a full song: two four-line verses of length
/// [`VERSE_LINE_LEN`] and a four-line chorus of length
/// [`CHORUS_LINE_LEN`], arranged verse-chorus-verse-chorus on display.
pub fn compose_song<R: Rng + ?Sized>(model: &LanguageModel, rng: &mut R) -> Result<Song> {
	let verse_one = plain_verse(model, SECTION_LINES, VERSE_LINE_LEN, rng)?;
	let verse_two = plain_verse(model, SECTION_LINES, VERSE_LINE_LEN, rng)?;
	let chorus = plain_verse(model, SECTION_LINES, CHORUS_LINE_LEN, rng)?;
	Ok(Song { verse_one, chorus, verse_two })
}
