use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, error};

use crate::graph::{Token, TransitionGraph};
use super::branch::BranchState;
use super::continuations::Continuations;
use super::params::SearchParams;

/// Sentences produced by a pool of worker threads.
///
/// Workers pull start contexts from a shared cursor, each start running on
/// a private deep copy of the graph, and push finished sentences through a
/// bounded channel. The order of the sentences is unspecified; the multiset
/// is the one produced by [`super::enumerate_all`].
///
/// Dropping the iterator closes the channel: every worker stops at its next
/// send without draining its remaining branches.
pub struct ParallelSentences<T> {
	receiver: Option<Receiver<Vec<T>>>,
	workers: Vec<JoinHandle<()>>,
}

impl<T> ParallelSentences<T> {
	/// Number of worker threads still attached.
	pub fn workers(&self) -> usize {
		self.workers.len()
	}

	fn join_workers(&mut self) {
		for worker in self.workers.drain(..) {
			if worker.join().is_err() {
				error!("sentence worker panicked, its sentences are missing");
			}
		}
	}
}

impl<T> Iterator for ParallelSentences<T> {
	type Item = Vec<T>;

	fn next(&mut self) -> Option<Self::Item> {
		let sentence = self.receiver.as_ref()?.recv().ok();
		if sentence.is_none() {
			// Every sender is gone: all workers are done
			self.receiver = None;
			self.join_workers();
		}
		sentence
	}
}

impl<T> Drop for ParallelSentences<T> {
	fn drop(&mut self) {
		// Close the channel first so that blocked workers return
		drop(self.receiver.take());
		self.join_workers();
	}
}

/// Enumerates every sentence of `graph` on `params.effective_workers()` threads.
///
/// At most one worker per start context is spawned; an empty graph spawns none.
pub fn enumerate_parallel<T>(
	graph: &TransitionGraph<T>,
	params: &SearchParams,
) -> ParallelSentences<T>
where
	T: Token + Send + Sync + 'static,
{
	let starts = Arc::new(graph.start_contexts());
	let graph = Arc::new(graph.clone());
	let cursor = Arc::new(AtomicUsize::new(0));
	let worker_count = params.effective_workers().min(starts.len());

	debug!(
		"enumerating sentences from {} start contexts on {} workers (n={}, k={})",
		starts.len(),
		worker_count,
		params.window(),
		params.max_len()
	);

	let (tx, rx) = mpsc::sync_channel(params.channel_bound);
	let mut workers = Vec::with_capacity(worker_count);
	for _ in 0..worker_count {
		let tx = tx.clone();
		let starts = Arc::clone(&starts);
		let graph = Arc::clone(&graph);
		let cursor = Arc::clone(&cursor);
		let params = params.clone();

		workers.push(thread::spawn(move || {
			while let Some(start) = starts.get(cursor.fetch_add(1, Ordering::Relaxed)) {
				let branch = TransitionGraph::clone(&graph);
				for sentence in Continuations::new(branch, &params, start.clone()) {
					if tx.send(sentence).is_err() {
						// Consumer is gone
						return;
					}
				}
			}
		}));
	}
	drop(tx);

	ParallelSentences { receiver: Some(rx), workers }
}
