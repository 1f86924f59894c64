use std::collections::BTreeSet;

use log::debug;

use crate::error::{ReconError, Result};

/// Default fraction of the minimal non-zero Dice below which a known
/// plaintext is considered disjoint from the target.
pub const DEFAULT_RATIO: f64 = 0.3;

/// Heuristic deciding that a known plaintext shares no n-gram with the target.
///
/// Both strategies additionally require the plaintext to share nothing with
/// the n-grams already known to be in the target.
#[derive(Clone, Debug, PartialEq)]
pub enum ZeroOverlapStrategy {
	/// Dice-based: a plaintext of `s` n-grams sharing a single n-gram with a
	/// target of `avg_plaintext_length` n-grams would score
	/// `2 / (s + avg_plaintext_length)`. Scores at or below `ratio` times
	/// that minimum are taken as zero overlap.
	RatioThreshold { ratio: f64, avg_plaintext_length: f64 },

	/// Jaccard-based: the overlap implied by similarity `j`,
	/// `round(j (s + avg_len) / (j + 1))`, is zero or negative.
	EstimatedOverlap { avg_len: f64 },
}

impl ZeroOverlapStrategy {
	/// Dice-based strategy with the default ratio.
	pub fn ratio_threshold(avg_plaintext_length: f64) -> Self {
		Self::RatioThreshold { ratio: DEFAULT_RATIO, avg_plaintext_length }
	}

	/// Jaccard-based strategy with the default average target size (1).
	pub fn estimated_overlap() -> Self {
		Self::EstimatedOverlap { avg_len: 1.0 }
	}

	fn is_zero_overlap(&self, sim: f64, plaintext_len: usize) -> bool {
		let plaintext_len = plaintext_len as f64;
		match *self {
			Self::RatioThreshold { ratio, avg_plaintext_length } => {
				let min_dice = 2.0 / (plaintext_len + avg_plaintext_length);
				sim <= min_dice * ratio
			}
			Self::EstimatedOverlap { avg_len } => {
				let overlap = (sim * (plaintext_len + avg_len) / (sim + 1.0)).round_ties_even();
				overlap <= 0.0
			}
		}
	}
}

/// Indices of the known plaintexts classified as disjoint from the target.
///
/// `target_sims[i]` is the similarity between the target and `known[i]`.
///
/// # Errors
/// Returns an error if both slices differ in length.
pub fn zero_overlap_candidates<T: Ord>(
	strategy: &ZeroOverlapStrategy,
	target_sims: &[f64],
	known: &[BTreeSet<T>],
	included: Option<&BTreeSet<T>>,
) -> Result<Vec<usize>> {
	if target_sims.len() != known.len() {
		return Err(ReconError::LengthMismatch { left: target_sims.len(), right: known.len() });
	}

	let candidates = target_sims
		.iter()
		.zip(known)
		.enumerate()
		.filter(|(_, (sim, ngrams))| {
			strategy.is_zero_overlap(**sim, ngrams.len())
				&& included.is_none_or(|included| included.is_disjoint(ngrams))
		})
		.map(|(index, _)| index)
		.collect();
	Ok(candidates)
}

/// Collects the n-grams that are most likely absent from the target.
///
/// Returns `not_included` (or a fresh empty set) extended with every n-gram
/// of every zero-overlap known plaintext.
///
/// # Errors
/// Returns an error if `target_sims` and `known` differ in length.
pub fn guess_zero_overlap<T: Ord + Clone>(
	strategy: &ZeroOverlapStrategy,
	target_sims: &[f64],
	known: &[BTreeSet<T>],
	included: Option<&BTreeSet<T>>,
	not_included: Option<BTreeSet<T>>,
) -> Result<BTreeSet<T>> {
	let candidates = zero_overlap_candidates(strategy, target_sims, known, included)?;
	debug!("{} of {} known plaintexts look disjoint from the target", candidates.len(), known.len());

	let mut not_included = not_included.unwrap_or_default();
	for index in candidates {
		not_included.extend(known[index].iter().cloned());
	}
	Ok(not_included)
}
