//! Set and sketch similarity toolkit feeding the transition graph.
//!
//! - Character n-gram sets and their transitions (`ngram`)
//! - Dice / Jaccard on sets, one-bit and min-hash sketches (`similarity`)
//! - Bloom filter cardinality estimates (`bloom`)
//! - Zero-overlap screening of known plaintexts (`overlap`)

/// Character n-grams and graph derivation.
pub mod ngram;

/// Similarity coefficients and their sketch estimators.
pub mod similarity;

pub mod bloom;

/// Zero-overlap heuristics, one strategy per variant.
pub mod overlap;
