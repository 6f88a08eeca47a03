//! The node type stored in a hierarchy arena.

use std::collections::BTreeMap;

use super::children::{Child, Children};
use crate::storage::NodeIndex;

/// Free-form key/value pairs attached to a node at construction.
pub type Metadata = BTreeMap<String, String>;

/// A container node: its id, its container link, its children and a payload.
///
/// `N` is the typed payload carried by every node (a folder, for example) and
/// `L` is the type of leaf content stored under keys.
#[derive(Debug, Clone)]
pub struct HierarchyNode<N, L> {
    id: Box<str>,
    pub(super) container: Option<NodeIndex>,
    pub(super) children: Children<L>,
    metadata: Metadata,
    data: N,
}

impl<N, L> HierarchyNode<N, L> {
    pub(super) fn new(id: String, data: N, metadata: Metadata) -> Self {
        Self {
            id: id.into_boxed_str(),
            container: None,
            children: Children::default(),
            metadata,
            data,
        }
    }

    /// The node's id, unique among the children of its container.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The container currently holding this node, if any.
    #[inline]
    pub fn container(&self) -> Option<NodeIndex> {
        self.container
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.container.is_none()
    }

    #[inline]
    pub fn children(&self) -> &Children<L> {
        &self.children
    }

    pub fn get(&self, key: &str) -> Option<&Child<L>> {
        self.children.get(key)
    }

    /// Node-typed children in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.children.nodes()
    }

    /// Leaf-typed children in insertion order.
    pub fn contents(&self) -> impl Iterator<Item = &L> + '_ {
        self.children.contents().map(|(_, value)| value)
    }

    pub fn content(&self, key: &str) -> Option<&L> {
        self.children.get(key).and_then(Child::as_content)
    }

    /// Mutable access to a leaf value. Leaves carry no identity, so editing
    /// them cannot break any container invariant.
    pub fn content_mut(&mut self, key: &str) -> Option<&mut L> {
        match self.children.get_mut(key) {
            Some(Child::Content(value)) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    #[inline]
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    #[inline]
    pub fn data(&self) -> &N {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut N {
        &mut self.data
    }
}
