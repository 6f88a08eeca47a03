//! Arena storage for hierarchy nodes.
//!
//! Nodes are stored in a slab and addressed by [`NodeIndex`]. Parent links
//! are plain indices, so a backlink never owns the node it points to.

mod index_types;
mod slab;

pub use index_types::NodeIndex;
pub use slab::{Slab, SlabIter};
