//! Bounded-depth sentence enumeration over a transition graph.
//!
//! - Search bounds and fan-out settings (`SearchParams`)
//! - Per-branch edge state: deep copy or overlay (`BranchState`)
//! - Depth-first continuation search from one start path (`Continuations`)
//! - Enumeration from every context, sequential or threaded (`Sentences`,
//!   `ParallelSentences`)

/// Validated search bounds (`n`, `k`) and worker settings.
pub mod params;

/// Edge state owned by a single search branch.
pub mod branch;

/// Depth-first continuation search with one-shot edge reuse.
pub mod continuations;

/// Sequential enumeration from every start context.
pub mod sentences;

/// Worker-pool enumeration merged through a bounded channel.
pub mod parallel;

pub use branch::{BranchState, Overlay};
pub use continuations::{search, Continuations};
pub use parallel::{enumerate_parallel, ParallelSentences};
pub use params::SearchParams;
pub use sentences::{enumerate_all, enumerate_all_overlay, Sentences};
