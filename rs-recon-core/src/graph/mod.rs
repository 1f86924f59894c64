//! Transition graph of a reconstruction session.
//!
//! - Per-context continuation sets (`State`)
//! - The context -> continuations mapping and its builder (`TransitionGraph`)

/// Context -> continuation-set mapping.
///
/// Handles construction by set union, merging, continuation lookups
/// and per-branch edge consumption.
pub mod transition_graph;

/// Internal representation of a single context and its continuations.
/// This module is not exposed publicly.
mod state;

pub use transition_graph::TransitionGraph;

/// Anything usable as a token of a sentence.
///
/// Tokens are compared and ordered, never interpreted: characters,
/// words or opaque ids all work.
pub trait Token: Clone + Ord + std::fmt::Debug {}

impl<T: Clone + Ord + std::fmt::Debug> Token for T {}
