use log::trace;

use crate::graph::{Token, TransitionGraph};
use super::branch::BranchState;
use super::params::SearchParams;

/// A pending branch: its private edge state and the path that reached it.
#[derive(Debug)]
struct Branch<T, S> {
	state: S,
	path: Vec<T>,
}

/// Lazy depth-first enumeration of every extension of a start path.
///
/// Each step of a branch runs, in order:
/// 1. **Consumption**: once the path holds at least `n` tokens, the edge
///    formed by its last window (`path[len-n..len-1] -> path[len-1]`) is
///    removed from the branch's own state. An edge is therefore traversed
///    at most once per branch, while the same context may still be left
///    through another continuation.
/// 2. **Termination**: the path is yielded if it holds `k` tokens (or more,
///    for a long start path), if its trailing `n-1` tokens are not a
///    context of the graph, or if that context has no continuation left.
/// 3. **Branching**: every remaining continuation spawns a child branch
///    owning a copy of the state as mutated so far.
///
/// Children are explored in ascending token order, so the output is
/// deterministic. Nothing is computed until `next` is called; dropping
/// the iterator abandons the pending branches.
#[derive(Debug)]
pub struct Continuations<T: Token, S: BranchState<T>> {
	n: usize,
	k: usize,
	stack: Vec<Branch<T, S>>,
}

impl<T: Token, S: BranchState<T>> Continuations<T, S> {
	/// Starts a search from `path` over a state owned by this search.
	pub fn new(state: S, params: &SearchParams, path: Vec<T>) -> Self {
		Self {
			n: params.window(),
			k: params.max_len(),
			stack: vec![Branch { state, path }],
		}
	}

	/// Number of branches waiting to be explored.
	pub fn pending(&self) -> usize {
		self.stack.len()
	}

	/// Trailing context of `path`, or `None` while the path is too short.
	fn current_context<'a>(&self, path: &'a [T]) -> Option<&'a [T]> {
		let context_len = self.n - 1;
		if path.len() < context_len {
			return None;
		}
		Some(&path[path.len() - context_len..])
	}
}

impl<T: Token, S: BranchState<T>> Iterator for Continuations<T, S> {
	type Item = Vec<T>;

	fn next(&mut self) -> Option<Self::Item> {
		while let Some(Branch { mut state, mut path }) = self.stack.pop() {
			let len = path.len();

			// One-shot reuse of the edge that produced the last token
			if len >= self.n {
				state.consume(&path[len - self.n..len - 1], &path[len - 1]);
			}

			if len >= self.k {
				return Some(path);
			}

			let remaining = self
				.current_context(&path)
				.and_then(|context| state.remaining(context))
				.unwrap_or_default();
			let Some((first, rest)) = remaining.split_first() else {
				return Some(path);
			};

			trace!("branch point at depth {}: {} continuations", len, remaining.len());

			// Pushed in reverse so that the smallest token is explored first.
			// The first child takes over the state, the others get copies.
			for token in rest.iter().rev() {
				let mut child = Vec::with_capacity(len + 1);
				child.extend_from_slice(&path);
				child.push(token.clone());
				self.stack.push(Branch { state: state.clone(), path: child });
			}
			path.push(first.clone());
			self.stack.push(Branch { state, path });
		}
		None
	}
}

/// Enumerates every extension of `path` over a graph owned by the search.
///
/// A start whose trailing context is not in the graph (which is always the
/// case for an empty graph) is yielded on its own. Use
/// [`super::enumerate_all`] to only start from known contexts.
///
/// Each branch point deep-copies the graph (see [`super::branch::Overlay`]
/// for the cheaper equivalent).
pub fn search<T: Token>(
	graph: TransitionGraph<T>,
	params: &SearchParams,
	path: Vec<T>,
) -> Continuations<T, TransitionGraph<T>> {
	Continuations::new(graph, params, path)
}
