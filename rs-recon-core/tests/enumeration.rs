use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use rs_recon_core::search::enumerate_all_overlay;
use rs_recon_core::{enumerate_all, enumerate_parallel, search, ReconError, SearchParams, TransitionGraph};

type Pairs = Vec<(Vec<u8>, Vec<u8>)>;

fn chars(s: &str) -> Vec<char> {
	s.chars().collect()
}

fn sorted(mut sentences: Vec<Vec<u8>>) -> Vec<Vec<u8>> {
	sentences.sort();
	sentences
}

#[test]
fn chain_stops_on_exhausted_context() {
	let graph = TransitionGraph::build(3, vec![
		(chars("AB"), chars("C")),
		(chars("BC"), chars("D")),
		(chars("CD"), vec![]),
	]).unwrap();
	let params = SearchParams::new(3, 5).unwrap();

	let sentences: Vec<_> = search(graph, &params, chars("AB")).collect();
	assert_eq!(sentences, vec![chars("ABCD")]);
}

#[test]
fn self_loop_is_traversed_once() {
	let graph = TransitionGraph::build(2, vec![(chars("A"), chars("A"))]).unwrap();
	let params = SearchParams::new(2, 4).unwrap();

	let sentences: Vec<_> = search(graph, &params, chars("A")).collect();
	assert_eq!(sentences, vec![chars("AA")]);
}

#[test]
fn empty_graph_enumerates_nothing() {
	for n in 1..4 {
		let graph = TransitionGraph::<char>::new(n).unwrap();
		let params = SearchParams::new(n, 6).unwrap();
		assert_eq!(enumerate_all(&graph, &params).count(), 0);
		assert_eq!(enumerate_parallel(&graph, &params).count(), 0);
	}
}

#[test]
fn invalid_input_is_rejected_before_search() {
	assert!(matches!(SearchParams::new(2, 0), Err(ReconError::InvalidBound { k: 0 })));
	assert!(matches!(
		TransitionGraph::build(2, vec![(chars("AB"), chars("C"))]),
		Err(ReconError::MalformedContext { expected: 1, found: 2 })
	));
}

#[test]
fn overlapping_sentences_from_other_starts_are_kept() {
	// "bc" is emitted on its own even though "abc" and "xbc" contain it
	let graph = TransitionGraph::build(2, vec![
		(chars("a"), chars("b")),
		(chars("b"), chars("c")),
		(chars("x"), chars("b")),
	]).unwrap();
	let params = SearchParams::new(2, 5).unwrap();
	let sentences: Vec<String> = enumerate_all(&graph, &params).map(|s| s.into_iter().collect()).collect();
	assert_eq!(sentences, vec!["abc", "bc", "xbc"]);
}

fn pairs_strategy(n: usize) -> impl Strategy<Value = Pairs> {
	prop::collection::vec(
		(prop::collection::vec(0u8..3, n - 1), prop::collection::vec(0u8..3, 0..3)),
		0..8,
	)
}

/// (n, k, pairs) with `k >= n-1`.
fn search_case() -> impl Strategy<Value = (usize, usize, Pairs)> {
	(1usize..=3).prop_flat_map(|n| (Just(n), (n - 1).max(1)..=6, pairs_strategy(n)))
}

/// Edges `window[..n-1] -> window[n-1]` of a sentence, in order.
fn edges(sentence: &[u8], n: usize) -> Vec<(Vec<u8>, u8)> {
	sentence
		.windows(n)
		.map(|window| (window[..n - 1].to_vec(), window[n - 1]))
		.collect()
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	#[test]
	fn build_ignores_pair_order(pairs in pairs_strategy(2), seed in any::<u64>()) {
		let reference = TransitionGraph::build(2, pairs.clone()).unwrap();

		let mut shuffled = pairs.clone();
		shuffled.shuffle(&mut StdRng::seed_from_u64(seed));
		prop_assert_eq!(&TransitionGraph::build(2, shuffled).unwrap(), &reference);

		let reversed: Pairs = pairs.into_iter().rev().collect();
		prop_assert_eq!(&TransitionGraph::build(2, reversed).unwrap(), &reference);
	}

	#[test]
	fn sentences_respect_the_search_rules((n, k, pairs) in search_case()) {
		let graph = TransitionGraph::build(n, pairs).unwrap();
		let params = SearchParams::new(n, k).unwrap();
		let sentences: Vec<Vec<u8>> = enumerate_all(&graph, &params).collect();

		let mut starts = BTreeSet::new();
		for sentence in &sentences {
			// Bounded length
			prop_assert!(sentence.len() <= k);
			starts.insert(sentence[..n - 1].to_vec());

			// One-shot reuse, and only edges of the graph
			let used = edges(sentence, n);
			let distinct: BTreeSet<_> = used.iter().cloned().collect();
			prop_assert_eq!(distinct.len(), used.len());
			for (context, next) in &used {
				prop_assert!(graph.continuations(context).is_some_and(|set| set.contains(next)));
			}

			// Termination completeness
			if sentence.len() < k {
				let context = &sentence[sentence.len() - (n - 1)..];
				if let Some(continuations) = graph.continuations(context) {
					for token in continuations {
						prop_assert!(distinct.contains(&(context.to_vec(), *token)));
					}
				}
			}
		}

		// Start coverage
		let contexts: BTreeSet<Vec<u8>> = graph.contexts().map(<[u8]>::to_vec).collect();
		prop_assert_eq!(starts, contexts);
	}

	#[test]
	fn strategies_agree((n, k, pairs) in search_case()) {
		let graph = TransitionGraph::build(n, pairs).unwrap();
		let mut params = SearchParams::new(n, k).unwrap();
		params.workers = 2;

		let deep: Vec<Vec<u8>> = enumerate_all(&graph, &params).collect();
		let overlay: Vec<Vec<u8>> = enumerate_all_overlay(Arc::new(graph.clone()), &params).collect();
		let parallel: Vec<Vec<u8>> = enumerate_parallel(&graph, &params).collect();

		prop_assert_eq!(&deep, &overlay);
		prop_assert_eq!(sorted(deep), sorted(parallel));
	}

	#[test]
	fn enumeration_leaves_the_graph_alone((n, k, pairs) in search_case()) {
		let graph = TransitionGraph::build(n, pairs).unwrap();
		let before = graph.clone();
		let params = SearchParams::new(n, k).unwrap();

		let first: Vec<Vec<u8>> = enumerate_all(&graph, &params).collect();
		let second: Vec<Vec<u8>> = enumerate_all(&graph, &params).collect();
		prop_assert_eq!(first, second);
		prop_assert_eq!(graph, before);
	}
}

#[test]
fn per_start_counts_add_up() {
	let graph = TransitionGraph::build(2, vec![
		(vec![0u8], vec![0, 1]),
		(vec![1u8], vec![0, 1]),
	]).unwrap();
	let params = SearchParams::new(2, 5).unwrap();

	let mut per_start: BTreeMap<Vec<u8>, usize> = BTreeMap::new();
	for context in graph.contexts() {
		let count = search(graph.clone(), &params, context.to_vec()).count();
		per_start.insert(context.to_vec(), count);
	}
	assert_eq!(enumerate_all(&graph, &params).count(), per_start.values().sum::<usize>());
}
