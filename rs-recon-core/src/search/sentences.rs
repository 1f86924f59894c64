use std::sync::Arc;

use log::debug;

use crate::graph::{Token, TransitionGraph};
use super::branch::{BranchState, Overlay};
use super::continuations::Continuations;
use super::params::SearchParams;

/// Lazy sequence of every sentence reachable from every context of a graph.
///
/// Each context is used exactly once as a start path, in ascending order,
/// with a private copy of the root state. Sentences discovered from two
/// different starts are all emitted (no deduplication).
///
/// The root state is taken when the enumeration is created, so later
/// changes to the caller's graph are not observed; enumerating again
/// re-derives everything.
#[derive(Debug)]
pub struct Sentences<T: Token, S: BranchState<T>> {
	root: S,
	params: SearchParams,
	starts: std::vec::IntoIter<Vec<T>>,
	current: Option<Continuations<T, S>>,
}

impl<T: Token, S: BranchState<T>> Sentences<T, S> {
	/// Enumerates from every context of `root`.
	pub fn new(root: S, params: &SearchParams) -> Self {
		let starts = root.start_contexts();
		debug!(
			"enumerating sentences from {} start contexts (n={}, k={})",
			starts.len(),
			params.window(),
			params.max_len()
		);
		Self {
			root,
			params: params.clone(),
			starts: starts.into_iter(),
			current: None,
		}
	}

	/// Number of start contexts not yet explored.
	pub fn remaining_starts(&self) -> usize {
		self.starts.len()
	}
}

impl<T: Token, S: BranchState<T>> Iterator for Sentences<T, S> {
	type Item = Vec<T>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			if let Some(sentence) = self.current.as_mut().and_then(|walk| walk.next()) {
				return Some(sentence);
			}
			let start = self.starts.next()?;
			self.current = Some(Continuations::new(self.root.clone(), &self.params, start));
		}
	}
}

/// Enumerates every sentence of `graph`, deep-copying the graph per branch.
///
/// The caller's graph is never mutated.
pub fn enumerate_all<T: Token>(
	graph: &TransitionGraph<T>,
	params: &SearchParams,
) -> Sentences<T, TransitionGraph<T>> {
	Sentences::new(graph.clone(), params)
}

/// Same sentences as [`enumerate_all`], with branches sharing the graph and
/// only recording the edges they consumed.
pub fn enumerate_all_overlay<T: Token>(
	graph: Arc<TransitionGraph<T>>,
	params: &SearchParams,
) -> Sentences<T, Overlay<T>> {
	Sentences::new(Overlay::new(graph), params)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn abc_graph() -> TransitionGraph<char> {
		TransitionGraph::build(2, vec![
			(vec!['a'], vec!['b']),
			(vec!['b'], vec!['c']),
			(vec!['c'], vec![]),
		]).unwrap()
	}

	#[test]
	fn every_context_is_a_start() {
		let params = SearchParams::new(2, 5).unwrap();
		let sentences: Vec<String> = enumerate_all(&abc_graph(), &params)
			.map(|s| s.into_iter().collect())
			.collect();
		assert_eq!(sentences, vec!["abc", "bc", "c"]);
	}

	#[test]
	fn empty_graph_yields_nothing() {
		let params = SearchParams::new(3, 5).unwrap();
		let graph = TransitionGraph::<char>::new(3).unwrap();
		assert_eq!(enumerate_all(&graph, &params).count(), 0);
	}

	#[test]
	fn caller_graph_is_untouched_and_restartable() {
		let graph = abc_graph();
		let params = SearchParams::new(2, 5).unwrap();
		let first: Vec<_> = enumerate_all(&graph, &params).collect();
		let second: Vec<_> = enumerate_all(&graph, &params).collect();
		assert_eq!(first, second);
		assert_eq!(graph, abc_graph());
	}

	#[test]
	fn overlay_enumerates_the_same_sentences() {
		let graph = TransitionGraph::build(2, vec![
			(vec!['a'], vec!['a', 'b']),
			(vec!['b'], vec!['a', 'c']),
			(vec!['c'], vec!['a']),
		]).unwrap();
		let params = SearchParams::new(2, 7).unwrap();

		let deep: Vec<_> = enumerate_all(&graph, &params).collect();
		let overlay: Vec<_> = enumerate_all_overlay(Arc::new(graph), &params).collect();
		assert!(!deep.is_empty());
		assert_eq!(deep, overlay);
	}

	#[test]
	fn stopping_early_leaves_starts_unexplored() {
		let params = SearchParams::new(2, 5).unwrap();
		let mut sentences = enumerate_all(&abc_graph(), &params);
		assert!(sentences.next().is_some());
		assert_eq!(sentences.remaining_starts(), 2);
	}
}
