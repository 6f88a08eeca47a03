//! Path-addressable container tree.
//!
//! A [`Hierarchy`] owns every [`HierarchyNode`] in a slab. Each node keeps an
//! ordered list of children keyed by name: a child is either another node or
//! an opaque content value. Nodes know their container through a non-owning
//! index, and a node's `ref_id` is derived from that chain on demand.

mod children;
mod node;
mod tree;
mod view;

pub use children::{Child, Children};
pub use node::{HierarchyNode, Metadata};
pub use tree::{Hierarchy, NodeSummary};
pub use view::NodeView;

/// Separator used when joining ids into a `ref_id`.
pub const KEY_SEPARATOR: char = '/';

/// Joins a container's ref_id and a child key.
pub fn join_ref_id(container_ref_id: &str, key: &str) -> String {
    let mut ref_id = String::with_capacity(container_ref_id.len() + key.len() + 1);
    ref_id.push_str(container_ref_id);
    ref_id.push(KEY_SEPARATOR);
    ref_id.push_str(key);
    ref_id
}
