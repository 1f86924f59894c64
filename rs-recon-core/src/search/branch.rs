use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::graph::{Token, TransitionGraph};

/// Edge state owned by a single search branch.
///
/// Every branch holds its own value; `clone` must produce a state whose
/// later consumption is invisible to the original. Two implementations
/// exist and produce the same sentences:
/// - [`TransitionGraph`]: a full deep copy of the graph per branch
/// - [`Overlay`]: a shared read-only graph plus the edges this branch consumed
pub trait BranchState<T: Token>: Clone {
	/// Every context of the underlying graph, ascending.
	fn start_contexts(&self) -> Vec<Vec<T>>;

	/// Removes the edge `context -> token` for this branch only.
	fn consume(&mut self, context: &[T], token: &T);

	/// Continuations still available from `context`, ascending.
	///
	/// `None` if the context is not part of the graph.
	fn remaining(&self, context: &[T]) -> Option<Vec<T>>;
}

impl<T: Token> BranchState<T> for TransitionGraph<T> {
	fn start_contexts(&self) -> Vec<Vec<T>> {
		self.contexts().map(<[T]>::to_vec).collect()
	}

	fn consume(&mut self, context: &[T], token: &T) {
		TransitionGraph::consume(self, context, token);
	}

	fn remaining(&self, context: &[T]) -> Option<Vec<T>> {
		self.continuations(context).map(|set| set.iter().cloned().collect())
	}
}

/// Copy-on-nothing branch state.
///
/// The graph itself is shared (`Arc`) and never mutated; consumption is
/// recorded in a small per-branch map of removed edges. Cloning costs the
/// size of that map (bounded by the path length) instead of the graph.
#[derive(Clone, Debug)]
pub struct Overlay<T: Token> {
	graph: Arc<TransitionGraph<T>>,
	consumed: BTreeMap<Vec<T>, BTreeSet<T>>,
}

impl<T: Token> Overlay<T> {
	/// Creates an overlay with no consumed edge.
	pub fn new(graph: Arc<TransitionGraph<T>>) -> Self {
		Self { graph, consumed: BTreeMap::new() }
	}

	pub fn graph(&self) -> &TransitionGraph<T> {
		&self.graph
	}

	/// Number of edges this branch consumed so far.
	pub fn consumed_len(&self) -> usize {
		self.consumed.values().map(BTreeSet::len).sum()
	}

	fn is_consumed(&self, context: &[T], token: &T) -> bool {
		self.consumed.get(context).is_some_and(|tokens| tokens.contains(token))
	}
}

impl<T: Token> BranchState<T> for Overlay<T> {
	fn start_contexts(&self) -> Vec<Vec<T>> {
		self.graph.start_contexts()
	}

	fn consume(&mut self, context: &[T], token: &T) {
		let exists = self.graph.continuations(context).is_some_and(|set| set.contains(token));
		if exists {
			self.consumed.entry(context.to_vec()).or_default().insert(token.clone());
		}
	}

	fn remaining(&self, context: &[T]) -> Option<Vec<T>> {
		let continuations = self.graph.continuations(context)?;
		Some(
			continuations
				.iter()
				.filter(|token| !self.is_consumed(context, token))
				.cloned()
				.collect(),
		)
	}
}
