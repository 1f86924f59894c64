use std::collections::BTreeSet;

use crate::error::{ReconError, Result};

/// Dice coefficient `2|A∩B| / (|A|+|B|)`. Two empty sets give `0.0`.
pub fn dice<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
	let total = a.len() + b.len();
	if total == 0 {
		return 0.0;
	}
	2.0 * a.intersection(b).count() as f64 / total as f64
}

/// Jaccard coefficient `|A∩B| / |A∪B|`. Two empty sets give `0.0`.
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
	let common = a.intersection(b).count();
	let union = a.len() + b.len() - common;
	if union == 0 {
		return 0.0;
	}
	common as f64 / union as f64
}

/// Dice of every pair `(a, b)`, row-major (`a` outer, `b` inner).
pub fn pairwise_dice<T: Ord>(a: &[BTreeSet<T>], b: &[BTreeSet<T>]) -> Vec<f64> {
	pairwise(a, b, dice)
}

/// Jaccard of every pair `(a, b)`, row-major.
pub fn pairwise_jaccard<T: Ord>(a: &[BTreeSet<T>], b: &[BTreeSet<T>]) -> Vec<f64> {
	pairwise(a, b, jaccard)
}

fn pairwise<A, B, F>(a: &[A], b: &[B], mut sim: F) -> Vec<f64>
where
	F: FnMut(&A, &B) -> f64,
{
	let mut sims = Vec::with_capacity(a.len() * b.len());
	for left in a {
		for right in b {
			sims.push(sim(left, right));
		}
	}
	sims
}

/// Jaccard estimate from two one-bit min-hash sketches.
///
/// With `c` the fraction of agreeing positions, the estimate is `2c - 1`
/// (it can be negative for unrelated inputs).
///
/// # Errors
/// Returns an error if the sketches differ in length or are empty.
pub fn est_1bit_jaccard<T: PartialEq>(a: &[T], b: &[T]) -> Result<f64> {
	if a.len() != b.len() {
		return Err(ReconError::LengthMismatch { left: a.len(), right: b.len() });
	}
	if a.is_empty() {
		return Err(ReconError::InvalidParameter("empty sketch".to_owned()));
	}
	let collisions = a.iter().zip(b).filter(|(x, y)| x == y).count();
	Ok(2.0 * (collisions as f64 / a.len() as f64) - 1.0)
}

/// Dice estimate from two one-bit min-hash sketches (`2J / (1+J)`).
///
/// Sketches that disagree everywhere give `-inf`.
pub fn est_1bit_dice<T: PartialEq>(a: &[T], b: &[T]) -> Result<f64> {
	let jacc = est_1bit_jaccard(a, b)?;
	Ok((2.0 * jacc) / (1.0 + jacc))
}

/// Dice over the distinct values of two min-hash signatures.
pub fn dice_sim<T: Ord>(a: &[T], b: &[T]) -> f64 {
	let a: BTreeSet<&T> = a.iter().collect();
	let b: BTreeSet<&T> = b.iter().collect();
	dice(&a, &b)
}

/// Jaccard over the distinct values of two min-hash signatures.
pub fn jaccard_sim<T: Ord>(a: &[T], b: &[T]) -> f64 {
	let a: BTreeSet<&T> = a.iter().collect();
	let b: BTreeSet<&T> = b.iter().collect();
	jaccard(&a, &b)
}

/// Pairwise Jaccard between two lists of min-hash signatures.
///
/// `onebit` selects [`est_1bit_jaccard`] (one-bit sketches) instead of
/// [`jaccard_sim`] (full hash values).
///
/// # Errors
/// With `onebit`, returns an error if two signatures differ in length.
pub fn pairwise_jaccard_tmh<T: Ord>(a: &[Vec<T>], b: &[Vec<T>], onebit: bool) -> Result<Vec<f64>> {
	let mut sims = Vec::with_capacity(a.len() * b.len());
	for left in a {
		for right in b {
			let sim = if onebit { est_1bit_jaccard(left, right)? } else { jaccard_sim(left, right) };
			sims.push(sim);
		}
	}
	Ok(sims)
}

/// Set sizes of an unknown plaintext compatible with an observed Dice value.
///
/// Tries every size below `max_set_size` and every overlap with the known
/// set (of size `known_set_size`); a size is kept when the Dice it implies
/// equals `dice` once both are rounded to one decimal. A non-finite `dice`
/// matches nothing.
pub fn guess_params(dice: f64, known_set_size: usize, max_set_size: usize) -> BTreeSet<usize> {
	let mut sizes = BTreeSet::new();
	let Some(target) = round_tenth(dice) else {
		return sizes;
	};
	for guess_size in 0..max_set_size {
		for guess_intersect in 0..guess_size.min(known_set_size) {
			let implied = 2.0 * guess_intersect as f64 / (known_set_size + guess_size) as f64;
			if round_tenth(implied) == Some(target) {
				sizes.insert(guess_size);
			}
		}
	}
	sizes
}

/// `value` rounded to one decimal, in tenths.
///
/// The formatter rounds the exact binary value, so `0.35` (stored as
/// `0.34999...`) gives `3`, not `4`.
fn round_tenth(value: f64) -> Option<i64> {
	format!("{:.1}", value).replace('.', "").parse().ok()
}

/// Summed absolute error between the exact Jaccard of `candidate` with the
/// `top_n` best known plaintexts and the similarities observed for them.
///
/// `ordered` lists known-plaintext indices, best first. Lower is better.
///
/// # Errors
/// Returns an error if `ordered` holds fewer than `top_n` entries or points
/// outside `known` / `target_sims`.
pub fn jaccard_mae<T: Ord>(
	candidate: &BTreeSet<T>,
	ordered: &[usize],
	target_sims: &[f64],
	known: &[BTreeSet<T>],
	top_n: usize,
) -> Result<f64> {
	if ordered.len() < top_n {
		return Err(ReconError::LengthMismatch { left: top_n, right: ordered.len() });
	}
	let mut error = 0.0;
	for &index in &ordered[..top_n] {
		let (Some(plaintext), Some(sim)) = (known.get(index), target_sims.get(index)) else {
			return Err(ReconError::InvalidParameter(format!("known plaintext index {} out of range", index)));
		};
		error += (jaccard(candidate, plaintext) - sim).abs();
	}
	Ok(error)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn set(items: &[&str]) -> BTreeSet<String> {
		items.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn dice_and_jaccard() {
		let a = set(&["ab", "bc", "cd"]);
		let b = set(&["bc", "cd", "de", "ef"]);
		assert!((dice(&a, &b) - 4.0 / 7.0).abs() < 1e-12);
		assert!((jaccard(&a, &b) - 2.0 / 5.0).abs() < 1e-12);
		assert_eq!(dice(&a, &a), 1.0);
		assert_eq!(jaccard(&BTreeSet::<u8>::new(), &BTreeSet::new()), 0.0);
	}

	#[test]
	fn pairwise_is_row_major() {
		let a = vec![set(&["x"]), set(&["y"])];
		let b = vec![set(&["x"]), set(&["z"]), set(&["y"])];
		assert_eq!(pairwise_dice(&a, &b), vec![1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
		assert_eq!(pairwise_jaccard(&a, &b).len(), 6);
	}

	#[test]
	fn one_bit_estimates() {
		let a = [0u8, 1, 1, 0];
		let b = [0u8, 1, 0, 0];
		assert_eq!(est_1bit_jaccard(&a, &b).unwrap(), 0.5);
		assert!((est_1bit_dice(&a, &b).unwrap() - 2.0 / 3.0).abs() < 1e-12);
		assert_eq!(est_1bit_jaccard(&a, &a).unwrap(), 1.0);
		assert!(matches!(est_1bit_jaccard(&a, &b[..3]), Err(ReconError::LengthMismatch { left: 4, right: 3 })));
		assert!(est_1bit_jaccard::<u8>(&[], &[]).is_err());
	}

	#[test]
	fn minhash_similarities_use_distinct_values() {
		let a = [1u64, 2, 2, 3];
		let b = [2u64, 3, 4];
		assert!((dice_sim(&a, &b) - 4.0 / 6.0).abs() < 1e-12);
		assert!((jaccard_sim(&a, &b) - 0.5).abs() < 1e-12);
	}

	#[test]
	fn pairwise_tmh_switches_estimator() {
		let a = vec![vec![1u64, 2, 3, 4]];
		let b = vec![vec![1u64, 2, 5, 6]];
		assert_eq!(pairwise_jaccard_tmh(&a, &b, true).unwrap(), vec![0.0]);
		assert!((pairwise_jaccard_tmh(&a, &b, false).unwrap()[0] - 2.0 / 6.0).abs() < 1e-12);
	}

	#[test]
	fn guess_params_finds_compatible_sizes() {
		// known set of 10, observed dice 0.5: a set of 10 sharing 5 fits
		let sizes = guess_params(0.5, 10, 40);
		assert!(sizes.contains(&10));
		assert!(!sizes.contains(&1));
		assert!(guess_params(0.5, 10, 0).is_empty());
		assert!(guess_params(f64::NAN, 10, 40).is_empty());
	}

	#[test]
	fn rounding_uses_the_stored_value() {
		assert_eq!(round_tenth(0.35), Some(3));
		assert_eq!(round_tenth(2.0 * 7.0 / 40.0), Some(3));
		assert_eq!(round_tenth(0.45), Some(5));
		assert_eq!(round_tenth(-0.04), Some(0));
		assert_eq!(round_tenth(f64::INFINITY), None);
	}

	#[test]
	fn observed_dice_of_0_35_falls_in_the_0_3_bucket() {
		// known set of 32, unknown of 8: overlaps 0..8 imply 0.0, 0.05, .., 0.35
		assert_eq!(guess_params(0.35, 32, 9), guess_params(0.3, 32, 9));
		assert!(guess_params(0.3, 32, 9).contains(&8));
		assert!(!guess_params(0.4, 32, 9).contains(&8));
	}

	#[test]
	fn mae_of_exact_candidate_is_zero() {
		let known = vec![set(&["ab", "bc"]), set(&["cd"]), set(&["ab"])];
		let candidate = set(&["ab", "bc"]);
		let sims: Vec<f64> = known.iter().map(|k| jaccard(&candidate, k)).collect();
		assert_eq!(jaccard_mae(&candidate, &[0, 2, 1], &sims, &known, 3).unwrap(), 0.0);
		assert!(jaccard_mae(&candidate, &[0], &sims, &known, 2).is_err());
		assert!(jaccard_mae(&candidate, &[7], &sims, &known, 1).is_err());
	}
}
