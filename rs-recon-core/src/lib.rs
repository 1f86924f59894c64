//! Plaintext reconstruction against similarity-preserving sketches.
//!
//! This crate provides:
//! - A transition graph of n-gram contexts and their possible continuations
//! - Exhaustive, bounded-depth enumeration of the sentences such a graph allows,
//!   with one-shot edge reuse per search branch
//! - Set / sketch similarity estimators (Dice, Jaccard, one-bit min-hash, Bloom)
//! - Zero-overlap screening of known plaintexts
//! - TSV loading of known plaintexts (cached as binary)
//!
//! The enumeration itself never scores, filters or deduplicates what it
//! produces: ranking candidates is left to the similarity estimators.

/// Error type shared by the whole crate.
pub mod error;

/// Context -> continuations graph and its construction.
pub mod graph;

/// Continuation search and sentence enumeration.
pub mod search;

/// Similarity estimators and n-gram helpers.
pub mod sketch;

/// Known plaintexts with their n-gram sets.
pub mod corpus;

/// TSV reading / writing and path helpers.
pub mod io;

pub use error::{ReconError, Result};
pub use graph::{Token, TransitionGraph};
pub use search::{enumerate_all, enumerate_parallel, search, SearchParams};
