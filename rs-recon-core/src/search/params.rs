use crate::error::{ReconError, Result};

/// Default capacity of the channel feeding the parallel enumerator.
pub const DEFAULT_CHANNEL_BOUND: usize = 1024;

/// Input parameters of a continuation search or a sentence enumeration.
///
/// `SearchParams` contains the validated search bounds (window `n`,
/// maximum sentence length `k`) and the fan-out settings used by the
/// parallel enumerator.
///
/// # Invariants
/// - `n >= 1`
/// - `k >= 1`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
	/// n-gram window (contexts hold `n-1` tokens).
	n: usize,

	/// Maximum number of tokens of an emitted sentence.
	k: usize,

	/// Number of worker threads of the parallel enumerator (0 = one per CPU).
	pub workers: usize,

	/// Number of finished sentences buffered between workers and the consumer.
	pub channel_bound: usize,
}

impl SearchParams {
	/// Creates search parameters for window `n` and maximum length `k`.
	///
	/// # Errors
	/// Returns an error if `n < 1` or `k < 1`.
	pub fn new(n: usize, k: usize) -> Result<Self> {
		let mut params = Self {
			n: 1,
			k: 1,
			workers: 0,
			channel_bound: DEFAULT_CHANNEL_BOUND,
		};
		params.set_window(n)?;
		params.set_max_len(k)?;
		Ok(params)
	}

	/// Returns the n-gram window.
	pub fn window(&self) -> usize {
		self.n
	}

	/// Returns the context length (`n-1`).
	pub fn context_len(&self) -> usize {
		self.n - 1
	}

	/// Returns the maximum sentence length.
	pub fn max_len(&self) -> usize {
		self.k
	}

	/// Sets the n-gram window.
	///
	/// # Errors
	/// Returns an error if `n < 1`.
	pub fn set_window(&mut self, n: usize) -> Result<()> {
		if n < 1 {
			return Err(ReconError::InvalidWindow { n });
		}
		self.n = n;
		Ok(())
	}

	/// Sets the maximum sentence length.
	///
	/// # Errors
	/// Returns an error if `k < 1`.
	pub fn set_max_len(&mut self, k: usize) -> Result<()> {
		if k < 1 {
			return Err(ReconError::InvalidBound { k });
		}
		self.k = k;
		Ok(())
	}

	/// Worker count actually used by the parallel enumerator.
	pub fn effective_workers(&self) -> usize {
		if self.workers == 0 { num_cpus::get().max(1) } else { self.workers }
	}
}
