//! Whole-subtree folds over a [`Hierarchy`](crate::Hierarchy).
//!
//! [`Hierarchy::recurse`] visits a node, then its leaf children, then each
//! node child in turn (pre-order, insertion order at every level) and records
//! the closure's result under the visited entry's ref_id. Queries, wildcard
//! search and exact lookup are built on top of it. Nothing is cached: every
//! call walks the subtree again.

mod accumulated;
mod recurse;
mod search;

pub use accumulated::{Accumulated, Acquired};
pub use recurse::{Step, Target, Visit};
pub use search::{exact_regex, wildcard_regex};
