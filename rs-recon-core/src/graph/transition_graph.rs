use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ReconError, Result};
use super::state::State;
use super::Token;

/// Represents the n-gram transition graph of a reconstruction session.
///
/// The `TransitionGraph` stores one state per context of length `n-1`
/// and the set of tokens that may follow it.
///
/// # Responsibilities
/// - Fold (context, continuation-set) pairs into a single mapping (set union)
/// - Derive transitions from token sequences
/// - Answer continuation lookups during the search
/// - Give up single edges inside a search branch (see [`TransitionGraph::consume`])
/// - Merge with another graph of the same window `n`
///
/// # Invariants
/// - `n` is always >= 1
/// - Every key of `states` is exactly `n-1` tokens long
/// - Construction never removes an entry
///
/// Cloning a graph is a deep copy: search branches rely on this to own
/// their edge consumption.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TransitionGraph<T: Token> {
	/// The n-gram window (context length + 1)
	n: usize, // must be >= 1

	/// Mapping from a context (length n-1) to its corresponding state
	states: BTreeMap<Vec<T>, State<T>>,
}

impl<T: Token> TransitionGraph<T> {
	/// Creates an empty transition graph for a window of `n` tokens.
	///
	/// # Errors
	/// Returns an error if `n < 1`.
	pub fn new(n: usize) -> Result<Self> {
		if n < 1 {
			return Err(ReconError::InvalidWindow { n });
		}
		Ok(Self { n, states: BTreeMap::new() })
	}

	/// Builds a graph from (context, continuations) pairs.
	///
	/// Pairs sharing a context are merged by set union, so the order of
	/// `pairs` never changes the result.
	///
	/// # Errors
	/// Returns an error if `n < 1` or if any context is not `n-1` tokens long.
	/// No partially built graph is returned.
	pub fn build<I, C>(n: usize, pairs: I) -> Result<Self>
	where
		I: IntoIterator<Item = (Vec<T>, C)>,
		C: IntoIterator<Item = T>,
	{
		let mut graph = Self::new(n)?;
		for (context, continuations) in pairs {
			graph.insert(&context, continuations)?;
		}
		debug!("built transition graph: n={}, {} contexts, {} edges", n, graph.len(), graph.edge_count());
		Ok(graph)
	}

	/// Adds continuations for a single context.
	///
	/// - If the context is new, it is inserted with `continuations` (possibly empty).
	/// - Otherwise its continuation set becomes the union of both.
	///
	/// # Errors
	/// Returns an error if `context` is not `n-1` tokens long. The graph is
	/// left untouched in that case.
	pub fn insert<C: IntoIterator<Item = T>>(
		&mut self,
		context: &[T],
		continuations: C,
	) -> Result<()> {
		self.check_context(context)?;
		let state = self.states.entry(context.to_vec()).or_insert_with(|| State::new(context));
		state.add_continuations(continuations);
		Ok(())
	}

	/// Adds every transition of a token sequence to the graph.
	///
	/// Each window of `n` consecutive tokens contributes the edge
	/// `window[..n-1] -> window[n-1]`. Sequences shorter than `n` are ignored.
	pub fn add_sentence(&mut self, tokens: &[T]) {
		if tokens.len() < self.n {
			// Sentence too short, no n-grams to compute
			return;
		}

		for window in tokens.windows(self.n) {
			let (context, next) = window.split_at(self.n - 1);
			let state = self.states.entry(context.to_vec()).or_insert_with(|| State::new(context));
			state.add_continuations(next.iter().cloned());
		}
	}

	/// The window `n` this graph was built for.
	pub fn window(&self) -> usize {
		self.n
	}

	/// Length of every context key (`n-1`).
	pub fn context_len(&self) -> usize {
		self.n - 1
	}

	/// Number of contexts.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Total number of (context -> token) edges.
	pub fn edge_count(&self) -> usize {
		self.states.values().map(|state| state.continuations().len()).sum()
	}

	/// Iterates over the contexts in ascending order.
	pub fn contexts(&self) -> impl Iterator<Item = &[T]> {
		self.states.keys().map(Vec::as_slice)
	}

	pub fn contains_context(&self, context: &[T]) -> bool {
		self.states.contains_key(context)
	}

	/// Returns the continuation set of `context`.
	///
	/// Returns `None` if the context is unknown. An empty set means the
	/// context is known but has no (remaining) continuation.
	pub fn continuations(&self, context: &[T]) -> Option<&BTreeSet<T>> {
		self.states.get(context).map(State::continuations)
	}

	/// Removes the edge `context -> token`.
	///
	/// Returns `true` if the edge existed. This is the one-shot reuse rule
	/// applied by search branches on their private copy.
	pub fn consume(&mut self, context: &[T], token: &T) -> bool {
		match self.states.get_mut(context) {
			Some(state) => state.consume(token),
			None => false,
		}
	}

	/// Merges another graph into this one.
	///
	/// # Errors
	/// Returns an error if the windows do not match.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.n != other.n {
			return Err(ReconError::MalformedContext {
				expected: self.context_len(),
				found: other.context_len(),
			});
		}

		for (key, state) in &other.states {
			if let Some(existing) = self.states.get_mut(key) {
				existing.merge(state)?;
			} else {
				self.states.insert(key.clone(), state.clone());
			}
		}

		Ok(())
	}

	fn check_context(&self, context: &[T]) -> Result<()> {
		if context.len() != self.context_len() {
			return Err(ReconError::MalformedContext {
				expected: self.context_len(),
				found: context.len(),
			});
		}
		Ok(())
	}
}
