//! Cardinality estimates on Bloom filters (Swamidass & Baldi).
//!
//! A filter is a bit slice of length `m` filled with `k` hash functions.
//! With `X` bits set, `n* = -(m/k) ln(1 - X/m)`.

use crate::error::{ReconError, Result};

/// Estimated number of elements inserted into `bits`.
///
/// # Errors
/// Returns an error if the filter is empty, `k == 0`, or every bit is set.
pub fn estimate_elements(bits: &[bool], k: usize) -> Result<f64> {
	estimate_from_ones(bits.len(), bits.iter().filter(|bit| **bit).count(), k)
}

/// Estimated size of the union of two filters built with the same `m` and `k`.
///
/// # Errors
/// Returns an error if the filters differ in length, or as [`estimate_elements`].
pub fn estimate_union(a: &[bool], b: &[bool], k: usize) -> Result<f64> {
	check_same_len(a, b)?;
	let ones = a.iter().zip(b).filter(|(x, y)| **x || **y).count();
	estimate_from_ones(a.len(), ones, k)
}

/// Estimated size of the intersection: `|A| + |B| - |A ∪ B|`.
///
/// The estimate can be slightly negative for disjoint inputs.
pub fn estimate_intersection(a: &[bool], b: &[bool], k: usize) -> Result<f64> {
	check_same_len(a, b)?;
	Ok(estimate_elements(a, k)? + estimate_elements(b, k)? - estimate_union(a, b, k)?)
}

fn check_same_len(a: &[bool], b: &[bool]) -> Result<()> {
	if a.len() != b.len() {
		return Err(ReconError::LengthMismatch { left: a.len(), right: b.len() });
	}
	Ok(())
}

fn estimate_from_ones(m: usize, ones: usize, k: usize) -> Result<f64> {
	if m == 0 {
		return Err(ReconError::InvalidParameter("empty bloom filter".to_owned()));
	}
	if k == 0 {
		return Err(ReconError::InvalidParameter("bloom filter needs k >= 1 hash functions".to_owned()));
	}
	if ones == m {
		return Err(ReconError::SaturatedFilter { bits: ones });
	}
	let m = m as f64;
	Ok(-(m / k as f64) * (1.0 - ones as f64 / m).ln())
}
