//! Materializing a directory subtree into an [`FsTree`].
//!
//! A [`Walker`] asks a [`LocationProvider`] for the children of a folder,
//! asks a [`Classifier`](crate::Classifier) which kind each one is, and
//! stores files as leaves and directories as nodes. `scan` fills one level,
//! `walk` fills the whole subtree depth-first.

mod entry;
mod memory;
mod names;
mod options;
mod provider;
mod subtree;
mod walk;

pub use entry::{File, Folder, FsEntry, FsTree};
pub use memory::MemoryFs;
pub use names::{KeywordParser, NameMetadata, NameMetadataExtractor};
pub use options::WalkOptions;
pub use provider::{LocalFs, LocationProvider};
pub use walk::{WalkStats, Walker};
