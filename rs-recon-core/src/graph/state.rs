use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ReconError, Result};
use super::Token;

/// Represents a state of the transition graph.
///
/// A `State` corresponds to a fixed (n-1)-token context (`key`) and stores
/// every token that may follow this context.
///
/// Conceptually, this is a node of the n-gram co-occurrence graph whose
/// outgoing edges are not weighted: an edge either exists or it does not.
///
/// ## Responsibilities:
/// - Accumulate continuations during construction (set union)
/// - Give up a single continuation when a search branch traverses it
/// - Merge with another state having the same key
///
/// ## Invariants
/// - All continuations belong to the same `key`
/// - Continuations never grow after a branch started consuming them
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct State<T: Token> {
	/// Identifier of the state (n-1 token context).
	key: Vec<T>,
	/// Tokens observed (or hypothesized) right after `key`.
	continuations: BTreeSet<T>,
}

impl<T: Token> State<T> {
	/// Creates a new state without continuations for the given context.
	pub fn new(key: &[T]) -> Self {
		Self {
			key: key.to_vec(),
			continuations: BTreeSet::new(),
		}
	}

	pub fn key(&self) -> &[T] {
		&self.key
	}

	pub fn continuations(&self) -> &BTreeSet<T> {
		&self.continuations
	}

	pub fn is_exhausted(&self) -> bool {
		self.continuations.is_empty()
	}

	/// Adds every token of `tokens` to the continuation set.
	pub fn add_continuations<I: IntoIterator<Item = T>>(&mut self, tokens: I) {
		self.continuations.extend(tokens);
	}

	/// Removes `token` from the continuation set.
	///
	/// Returns `true` if the edge existed. Removing an absent edge is a no-op.
	pub fn consume(&mut self, token: &T) -> bool {
		self.continuations.remove(token)
	}

	/// Merges another state into this one (union of continuations).
	///
	/// # Errors
	/// Returns an error if the state keys differ in arity.
	/// Keys with the same arity but different tokens are a caller bug.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.key.len() != other.key.len() {
			return Err(ReconError::MalformedContext {
				expected: self.key.len(),
				found: other.key.len(),
			});
		}
		debug_assert_eq!(self.key, other.key);

		self.continuations.extend(other.continuations.iter().cloned());
		Ok(())
	}
}
