//! Path-addressable in-memory trees of filesystem subtrees.
//!
//! This crate provides:
//! - A slab-backed container hierarchy with slash-joined `ref_id` identity
//! - Pre-order folds for queries, wildcard search and bulk mutation
//! - First-match-wins classification of entries into typed kinds
//! - A walker that materializes directories through a location provider

pub mod classify;
pub mod error;
pub mod hierarchy;
pub mod storage;
pub mod traverse;
pub mod walker;

// Re-export main types
pub use classify::{Classifier, EntryType, Hook, Plain, Variant};
pub use error::{HierarchyError, Result};
pub use hierarchy::{Child, Hierarchy, HierarchyNode, Metadata, NodeSummary};
pub use storage::NodeIndex;
pub use traverse::{Accumulated, Acquired, Step, Target, Visit};
pub use walker::{
    File, Folder, FsEntry, FsTree, KeywordParser, LocalFs, LocationProvider, MemoryFs,
    NameMetadata, NameMetadataExtractor, WalkOptions, WalkStats, Walker,
};
