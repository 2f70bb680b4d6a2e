//! Sentinel tokens bounding every training sentence.
//!
//! A prepared sentence always has the shape
//! `^::^ ^:::^ word … word $:::$`: two start markers, the ordinary
//! tokens, and one terminator. The markers never appear inside a
//! generated line; they exist so that the counting models can learn
//! how sentences open and close.

/// Outermost start-of-sentence marker.
pub const START_OUTER: &str = "^::^";

/// Inner start-of-sentence marker, always directly after [`START_OUTER`].
pub const START_INNER: &str = "^:::^";

/// End-of-sentence terminator. Sampling this token stops a line.
pub const END: &str = "$:::$";

/// Returns true if `token` is one of the three boundary markers.
pub fn is_sentinel(token: &str) -> bool {
	token == START_OUTER || token == START_INNER || token == END
}

/// Returns the two-token prefix every generation run starts from.
///
/// The prefix is part of the working context only; finished lines
/// never contain it.
pub fn line_opening() -> Vec<String> {
	vec![START_OUTER.to_owned(), START_INNER.to_owned()]
}
