//! Embedded word lexicon backing the rhyme and part-of-speech lookups.
//!
//! Each entry in `assets/lexicon.json` gives a word its rime class (two
//! words rhyme when they share one) and a part-of-speech tag. Words the
//! lexicon does not know rhyme with nothing and classify as other.

use std::collections::HashMap;

use serde::Deserialize;

use versegen_core::phrase::{RoleClassifier, WordRole};
use versegen_core::song::RhymeLookup;

/// One lexicon entry as stored in the JSON file.
#[derive(Debug, Clone, Deserialize)]
struct Entry {
    word: String,
    rime: String,
    pos: Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Pos {
    Noun,
    Verb,
    Adjective,
    Other,
}

/// The top-level JSON structure for the lexicon file.
#[derive(Debug, Deserialize)]
struct LexiconFile {
    words: Vec<Entry>,
}

/// A loaded lexicon with rhyme-family and word-role queries.
pub struct Lexicon {
    by_word: HashMap<String, (String, Pos)>,
    by_rime: HashMap<String, Vec<String>>,
}

impl Lexicon {
    /// Parse a lexicon from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: LexiconFile = serde_json::from_str(json)?;
        let mut by_word = HashMap::new();
        let mut by_rime: HashMap<String, Vec<String>> = HashMap::new();
        for entry in file.words {
            by_rime.entry(entry.rime.clone()).or_default().push(entry.word.clone());
            by_word.insert(entry.word, (entry.rime, entry.pos));
        }
        Ok(Self { by_word, by_rime })
    }

    /// The lexicon embedded at compile time from `assets/lexicon.json`.
    pub fn embedded() -> Result<Self, serde_json::Error> {
        Self::from_json(include_str!("../assets/lexicon.json"))
    }
}

impl RhymeLookup for Lexicon {
    fn rhymes_of(&self, word: &str) -> Vec<String> {
        let Some((rime, _)) = self.by_word.get(word) else {
            return Vec::new();
        };
        self.by_rime
            .get(rime)
            .map(|family| family.iter().filter(|other| *other != word).cloned().collect())
            .unwrap_or_default()
    }
}

impl RoleClassifier for Lexicon {
    fn role_of(&self, word: &str) -> WordRole {
        match self.by_word.get(word) {
            Some((_, Pos::Noun)) => WordRole::Noun,
            Some((_, Pos::Verb)) => WordRole::Verb,
            Some((_, Pos::Adjective)) => WordRole::Adjective,
            Some((_, Pos::Other)) | None => WordRole::Other,
        }
    }
}
