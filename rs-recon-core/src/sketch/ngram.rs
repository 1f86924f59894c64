use std::collections::BTreeSet;

use crate::error::Result;
use crate::graph::TransitionGraph;

/// Lowercases `text` and drops its spaces.
///
/// This is the alphabet every n-gram set and every reconstructed sentence
/// lives in.
pub fn normalize(text: &str) -> String {
	text.chars()
		.filter(|c| *c != ' ')
		.flat_map(char::to_lowercase)
		.collect()
}

/// Returns the set of character n-grams of `text` (after [`normalize`]).
///
/// Texts shorter than `n` (and `n == 0`) give an empty set.
pub fn calc_ngram(text: &str, n: usize) -> BTreeSet<String> {
	let chars: Vec<char> = normalize(text).chars().collect();
	if n == 0 || chars.len() < n {
		return BTreeSet::new();
	}
	chars.windows(n).map(|window| window.iter().collect()).collect()
}

/// Splits every n-gram into its context (all but the last character) and
/// its continuation (the last character).
///
/// An empty string yields an empty context without continuation.
pub fn transitions<'a, I>(ngrams: I) -> Vec<(Vec<char>, Option<char>)>
where
	I: IntoIterator<Item = &'a String>,
{
	ngrams
		.into_iter()
		.map(|ngram| {
			let mut chars: Vec<char> = ngram.chars().collect();
			let last = chars.pop();
			(chars, last)
		})
		.collect()
}

/// Builds the transition graph of a set of character n-grams.
///
/// # Errors
/// Returns an error if `n < 1` or if an n-gram is not `n` characters long.
pub fn graph_from_ngrams<'a, I>(n: usize, ngrams: I) -> Result<TransitionGraph<char>>
where
	I: IntoIterator<Item = &'a String>,
{
	TransitionGraph::build(n, transitions(ngrams))
}
