//! Error types for rs-recon-core.

use thiserror::Error;

/// Top-level error type for graph construction, search and sketch estimation.
#[derive(Debug, Error)]
pub enum ReconError {
	/// A context does not hold exactly `n-1` tokens.
	#[error("malformed context: expected {expected} tokens, found {found}")]
	MalformedContext { expected: usize, found: usize },

	/// The maximum sentence length is below 1.
	#[error("invalid bound: k must be >= 1, got {k}")]
	InvalidBound { k: usize },

	/// The n-gram window is below 1.
	#[error("invalid window: n must be >= 1, got {n}")]
	InvalidWindow { n: usize },

	/// Two sketches (or a sketch list and its similarity list) differ in length.
	#[error("length mismatch: {left} != {right}")]
	LengthMismatch { left: usize, right: usize },

	/// Every bit of a Bloom filter is set, its cardinality cannot be estimated.
	#[error("saturated bloom filter ({bits} bits set)")]
	SaturatedFilter { bits: usize },

	/// Out of range numeric parameter.
	#[error("invalid parameter: {0}")]
	InvalidParameter(String),

	/// A TSV row could not be interpreted.
	#[error("tsv error at line {line}: {reason}")]
	Tsv { line: usize, reason: String },

	/// I/O error wrapper.
	#[error("io error: {0}")]
	Io(#[from] std::io::Error),

	/// Binary cache encoding/decoding error.
	#[error("encode error: {0}")]
	Encode(#[from] postcard::Error),
}

/// Result type for rs-recon operations.
pub type Result<T> = std::result::Result<T, ReconError>;
