//! First-match-wins dispatch from filesystem entries to typed kinds.
//!
//! Each kind of a closed [`Variant`] enum declares the hooks that select it
//! for directories and for files. A [`Classifier`] flattens them into two
//! ordered tables and returns the kind bound to the first matching hook.

mod classifier;
mod hook;

pub use classifier::{Classifier, EntryType, Plain, Variant};
pub use hook::Hook;
