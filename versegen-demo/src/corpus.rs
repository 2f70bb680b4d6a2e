//! Corpus preparation: raw lyric lines in, sentinel-bounded token
//! sentences out. One input line is one sentence.

use versegen_core::token::{END, line_opening};

/// The embedded training corpus, one lyric line per row.
pub const RAW_LYRICS: &str = include_str!("../assets/corpus.txt");

/// Tokenizes raw lyric text into the sentence shape the model trains
/// on: lowercased, whitespace-split, wrapped in the boundary sentinels.
/// Blank lines are skipped.
pub fn prepare(raw: &str) -> Vec<Vec<String>> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut sentence = line_opening();
            sentence.extend(line.to_lowercase().split_whitespace().map(str::to_owned));
            sentence.push(END.to_owned());
            sentence
        })
        .collect()
}
