use std::collections::BTreeSet;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{ReconError, Result};
use crate::graph::TransitionGraph;
use crate::io::{build_output_path, read_tsv};
use crate::sketch::ngram::{calc_ngram, graph_from_ngrams};

/// Known plaintexts and their character n-gram sets.
///
/// This is the side of the attack the adversary fully knows: every known
/// plaintext can be compared with the target sketch, and the n-grams of the
/// ones that survive the screening feed the transition graph.
///
/// # Invariants
/// - `texts`, `uids` and `ngrams` have the same length
/// - `ngrams[i] == calc_ngram(texts[i], n)`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Corpus {
	n: usize,
	texts: Vec<String>,
	uids: Vec<String>,
	ngrams: Vec<BTreeSet<String>>,
}

impl Corpus {
	/// Builds a corpus from raw texts and their identifiers.
	///
	/// # Errors
	/// Returns an error if `n < 1` or if `texts` and `uids` differ in length.
	pub fn from_texts(n: usize, texts: Vec<String>, uids: Vec<String>) -> Result<Self> {
		if n < 1 {
			return Err(ReconError::InvalidWindow { n });
		}
		if texts.len() != uids.len() {
			return Err(ReconError::LengthMismatch { left: texts.len(), right: uids.len() });
		}
		let ngrams = texts.iter().map(|text| calc_ngram(text, n)).collect();
		Ok(Self { n, texts, uids, ngrams })
	}

	/// Loads a corpus from a tab separated file (with a header line), or from
	/// its binary cache when one exists for the same `n`.
	///
	/// - The data columns of a row are concatenated into the plaintext
	/// - The last column is the row uid
	/// - The cache lives next to the file, with a `.bin` extension, and is
	///   (re)written with `postcard` after parsing the TSV
	pub fn load<P: AsRef<Path>>(filepath: P, n: usize) -> Result<Self> {
		let binary_data_path = build_output_path(&filepath, "bin")?;
		if binary_data_path.exists() {
			let bytes = std::fs::read(&binary_data_path)?;
			let corpus: Self = postcard::from_bytes(&bytes)?;
			if corpus.n == n {
				info!("loaded cached corpus {} ({} plaintexts)", binary_data_path.display(), corpus.len());
				return Ok(corpus);
			}
			info!("cached corpus {} was built for n={}, rebuilding", binary_data_path.display(), corpus.n);
		}

		let table = read_tsv(&filepath, true, '\t')?;
		let texts = table.rows.iter().map(|row| row.concat()).collect();
		let corpus = Self::from_texts(n, texts, table.uids)?;

		let bytes = postcard::to_stdvec(&corpus)?;
		std::fs::write(&binary_data_path, bytes)?;
		info!("parsed corpus {} ({} plaintexts)", filepath.as_ref().display(), corpus.len());

		Ok(corpus)
	}

	pub fn window(&self) -> usize {
		self.n
	}

	pub fn len(&self) -> usize {
		self.texts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.texts.is_empty()
	}

	pub fn texts(&self) -> &[String] {
		&self.texts
	}

	pub fn uids(&self) -> &[String] {
		&self.uids
	}

	pub fn ngrams(&self) -> &[BTreeSet<String>] {
		&self.ngrams
	}

	/// Mean n-gram set size, `0.0` for an empty corpus.
	pub fn average_len(&self) -> f64 {
		if self.ngrams.is_empty() {
			return 0.0;
		}
		self.ngrams.iter().map(BTreeSet::len).sum::<usize>() as f64 / self.ngrams.len() as f64
	}

	/// Similarity of `target` with every known plaintext, in corpus order.
	pub fn similarities<F>(&self, target: &BTreeSet<String>, mut measure: F) -> Vec<f64>
	where
		F: FnMut(&BTreeSet<String>, &BTreeSet<String>) -> f64,
	{
		self.ngrams.iter().map(|ngrams| measure(target, ngrams)).collect()
	}

	/// Every n-gram of the corpus that is not in `excluded`.
	pub fn surviving_ngrams(&self, excluded: &BTreeSet<String>) -> BTreeSet<String> {
		self.ngrams
			.iter()
			.flatten()
			.filter(|ngram| !excluded.contains(*ngram))
			.cloned()
			.collect()
	}

	/// Transition graph of the n-grams that survived the screening.
	pub fn graph(&self, excluded: &BTreeSet<String>) -> Result<TransitionGraph<char>> {
		graph_from_ngrams(self.n, &self.surviving_ngrams(excluded))
	}
}
