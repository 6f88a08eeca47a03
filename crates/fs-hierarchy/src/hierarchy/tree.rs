//! The hierarchy arena and its ownership-preserving operations.
//!
//! Every mutation that moves a node validates first and mutates second, so a
//! failed call leaves the tree unchanged. A node is held by at most one
//! container, always under a key equal to its own id.

use std::fmt;

use super::children::Child;
use super::node::{HierarchyNode, Metadata};
use super::view::NodeView;
use super::{join_ref_id, KEY_SEPARATOR};
use crate::error::{HierarchyError, Result};
use crate::storage::{NodeIndex, Slab};

/// Arena owning the nodes of one or more trees.
#[derive(Debug, Clone)]
pub struct Hierarchy<N, L> {
    slab: Slab<HierarchyNode<N, L>>,
}

impl<N, L> Default for Hierarchy<N, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, L> Hierarchy<N, L> {
    pub fn new() -> Self {
        Self { slab: Slab::new() }
    }

    /// Number of live nodes across all trees in the arena.
    pub fn len(&self) -> usize {
        self.slab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slab.is_empty()
    }

    pub fn contains(&self, index: NodeIndex) -> bool {
        self.slab.contains(index)
    }

    pub fn get(&self, index: NodeIndex) -> Option<&HierarchyNode<N, L>> {
        self.slab.get(index)
    }

    /// Mutable access to a node's payload, metadata and leaf values.
    ///
    /// Structural changes still have to go through the hierarchy.
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut HierarchyNode<N, L>> {
        self.slab.get_mut(index)
    }

    /// Like [`get`](Self::get) but fails with `UnknownNode`.
    pub fn node(&self, index: NodeIndex) -> Result<&HierarchyNode<N, L>> {
        self.slab.get(index).ok_or(HierarchyError::UnknownNode(index))
    }

    pub fn node_mut(&mut self, index: NodeIndex) -> Result<&mut HierarchyNode<N, L>> {
        self.slab
            .get_mut(index)
            .ok_or(HierarchyError::UnknownNode(index))
    }

    /// Indices of every node without a container.
    pub fn roots(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.slab
            .iter()
            .filter(|(_, node)| node.is_root())
            .map(|(index, _)| index)
    }

    pub fn view(&self, index: NodeIndex) -> NodeView<'_, N, L> {
        NodeView::new(&self.slab, index)
    }

    pub(crate) fn slab(&self) -> &Slab<HierarchyNode<N, L>> {
        &self.slab
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Creates a node, inserting it into `container` under its id when given.
    ///
    /// Fails with `InvalidId` for an empty id or one containing the key
    /// separator, `UnknownNode` when the container does not exist and
    /// `Occupied` when the container already holds a child under `id`.
    pub fn create_node(
        &mut self,
        id: impl Into<String>,
        container: Option<NodeIndex>,
        data: N,
        metadata: Metadata,
    ) -> Result<NodeIndex> {
        let id = id.into();
        if id.is_empty() || id.contains(KEY_SEPARATOR) {
            return Err(HierarchyError::InvalidId(id));
        }
        if let Some(container) = container {
            if self.node(container)?.children.contains_key(&id) {
                return Err(HierarchyError::Occupied {
                    ref_id: self.ref_id(container)?,
                    key: id,
                });
            }
        }

        let index = self.slab.insert(HierarchyNode::new(id, data, metadata));
        if let Some(container) = container {
            self.attach(index, container);
        }
        Ok(index)
    }

    pub fn create_root(&mut self, id: impl Into<String>, data: N) -> Result<NodeIndex> {
        self.create_node(id, None, data, Metadata::new())
    }

    pub fn create_child(
        &mut self,
        parent: NodeIndex,
        id: impl Into<String>,
        data: N,
    ) -> Result<NodeIndex> {
        self.create_node(id, Some(parent), data, Metadata::new())
    }

    // -----------------------------------------------------------------------
    // Mapping operations
    // -----------------------------------------------------------------------

    /// Stores `child` under `key` in `parent`, returning whatever it replaced.
    ///
    /// A node child must be stored under its own id; it is detached from its
    /// previous container first. A replaced node becomes a root.
    pub fn set(
        &mut self,
        parent: NodeIndex,
        key: &str,
        child: Child<L>,
    ) -> Result<Option<Child<L>>> {
        self.node(parent)?;
        match child {
            Child::Node(index) => {
                let node = self.node(index)?;
                if node.id() != key {
                    return Err(HierarchyError::KeyMismatch {
                        key: key.to_string(),
                        id: node.id().to_string(),
                    });
                }
                self.check_acyclic(index, parent)?;
                Ok(self.attach(index, parent))
            }
            Child::Content(value) => {
                let replaced = self.slab[parent]
                    .children
                    .insert(key, Child::Content(value));
                Ok(self.release(replaced))
            }
        }
    }

    /// Stores an existing node under its own id.
    pub fn add_node(&mut self, parent: NodeIndex, node: NodeIndex) -> Result<Option<Child<L>>> {
        let id = self.node(node)?.id().to_string();
        self.set(parent, &id, Child::Node(node))
    }

    /// Stores a leaf value under `key`.
    pub fn insert_content(
        &mut self,
        parent: NodeIndex,
        key: &str,
        value: L,
    ) -> Result<Option<Child<L>>> {
        self.set(parent, key, Child::Content(value))
    }

    /// Removes the child under `key`. A removed node keeps living in the
    /// arena as a root.
    pub fn delete(&mut self, parent: NodeIndex, key: &str) -> Result<Child<L>> {
        let removed = self.node_mut(parent)?.children.remove(key);
        match removed {
            Some(child) => {
                if let Child::Node(index) = &child {
                    if let Some(node) = self.slab.get_mut(*index) {
                        node.container = None;
                    }
                }
                Ok(child)
            }
            None => Err(HierarchyError::MissingKey {
                ref_id: self.ref_id(parent)?,
                key: key.to_string(),
            }),
        }
    }

    pub fn remove_node(&mut self, parent: NodeIndex, id: &str) -> Result<Child<L>> {
        self.delete(parent, id)
    }

    /// Moves `index` into `container`, or detaches it when `container` is
    /// `None`. Returns the child previously stored under the node's id in the
    /// new container, if any.
    pub fn set_container(
        &mut self,
        index: NodeIndex,
        container: Option<NodeIndex>,
    ) -> Result<Option<Child<L>>> {
        self.node(index)?;
        match container {
            None => {
                self.detach(index);
                Ok(None)
            }
            Some(container) => {
                self.node(container)?;
                self.check_acyclic(index, container)?;
                Ok(self.attach(index, container))
            }
        }
    }

    pub fn container(&self, index: NodeIndex) -> Result<Option<NodeIndex>> {
        Ok(self.node(index)?.container())
    }

    /// Node-typed children of `parent`, in insertion order.
    pub fn nodes(&self, parent: NodeIndex) -> Result<Vec<NodeIndex>> {
        Ok(self.node(parent)?.nodes().collect())
    }

    /// Leaf-typed children of `parent`, in insertion order.
    pub fn contents(&self, parent: NodeIndex) -> Result<Vec<&L>> {
        Ok(self.node(parent)?.contents().collect())
    }

    /// Replaces every node child of `parent` with `nodes`, leaving leaf
    /// children untouched.
    pub fn set_nodes(&mut self, parent: NodeIndex, nodes: Vec<NodeIndex>) -> Result<()> {
        self.node(parent)?;
        for &index in &nodes {
            self.node(index)?;
            self.check_acyclic(index, parent)?;
        }

        for current in self.nodes(parent)? {
            self.detach(current);
        }
        for index in nodes {
            self.attach(index, parent);
        }
        Ok(())
    }

    /// Detaches every node child, then empties the mapping.
    pub fn clear(&mut self, parent: NodeIndex) -> Result<()> {
        let drained = self.node_mut(parent)?.children.take_all();
        for (_, child) in drained {
            if let Child::Node(index) = child {
                if let Some(node) = self.slab.get_mut(index) {
                    node.container = None;
                }
            }
        }
        Ok(())
    }

    /// Frees a detached node and its whole subtree from the arena, returning
    /// how many nodes were released.
    pub fn discard(&mut self, root: NodeIndex) -> Result<usize> {
        if self.node(root)?.container.is_some() {
            return Err(HierarchyError::Attached(root));
        }

        let mut released = 0;
        let mut pending = vec![root];
        while let Some(index) = pending.pop() {
            if let Some(node) = self.slab.try_remove(index) {
                pending.extend(node.nodes());
                released += 1;
            }
        }
        Ok(released)
    }

    // -----------------------------------------------------------------------
    // Identity
    // -----------------------------------------------------------------------

    /// The `/`-joined ids from the root down to `index`.
    pub fn ref_id(&self, index: NodeIndex) -> Result<String> {
        NodeView::new(&self.slab, index)
            .compute_ref_id()
            .ok_or(HierarchyError::UnknownNode(index))
    }

    /// The ref_id a leaf stored under `key` in `parent` would have.
    pub fn content_ref_id(&self, parent: NodeIndex, key: &str) -> Result<String> {
        Ok(join_ref_id(&self.ref_id(parent)?, key))
    }

    pub fn depth(&self, index: NodeIndex) -> Result<usize> {
        NodeView::new(&self.slab, index)
            .compute_depth()
            .ok_or(HierarchyError::UnknownNode(index))
    }

    /// A printable one-line description of a node.
    pub fn summary(&self, index: NodeIndex) -> Result<NodeSummary> {
        let node = self.node(index)?;
        Ok(NodeSummary {
            label: "HierarchyNode",
            ref_id: self.ref_id(index)?,
            nodes: node.nodes().count(),
            contents: node.contents().count(),
            node_label: "nodes",
            content_label: "contents",
        })
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Fails if `container` is `index` itself or lives inside its subtree.
    fn check_acyclic(&self, index: NodeIndex, container: NodeIndex) -> Result<()> {
        if NodeView::new(&self.slab, container).is_within(index) {
            return Err(HierarchyError::Cycle {
                node: index,
                container,
            });
        }
        Ok(())
    }

    /// Links a validated node into `parent`. The old mapping entry is removed
    /// before the new one is written.
    fn attach(&mut self, index: NodeIndex, parent: NodeIndex) -> Option<Child<L>> {
        if self.slab[index].container == Some(parent) {
            return None;
        }
        self.detach(index);

        let id = self.slab[index].id().to_owned();
        let replaced = self.slab[parent].children.insert(&id, Child::Node(index));
        self.slab[index].container = Some(parent);
        self.release(replaced)
    }

    fn detach(&mut self, index: NodeIndex) {
        let Some(container) = self.slab[index].container.take() else {
            return;
        };
        let id = self.slab[index].id().to_owned();
        if let Some(parent) = self.slab.get_mut(container) {
            parent.children.remove(&id);
        }
    }

    /// Clears the backlink of a node that was overwritten in a mapping.
    fn release(&mut self, replaced: Option<Child<L>>) -> Option<Child<L>> {
        if let Some(Child::Node(old)) = &replaced {
            if let Some(node) = self.slab.get_mut(*old) {
                node.container = None;
            }
        }
        replaced
    }
}

/// One-line description of a node: its ref_id and child counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSummary {
    label: &'static str,
    ref_id: String,
    nodes: usize,
    contents: usize,
    node_label: &'static str,
    content_label: &'static str,
}

impl NodeSummary {
    /// Renames the type and child-count labels.
    pub fn with_labels(
        mut self,
        label: &'static str,
        node_label: &'static str,
        content_label: &'static str,
    ) -> Self {
        self.label = label;
        self.node_label = node_label;
        self.content_label = content_label;
        self
    }

    pub fn ref_id(&self) -> &str {
        &self.ref_id
    }

    pub fn nodes(&self) -> usize {
        self.nodes
    }

    pub fn contents(&self) -> usize {
        self.contents
    }
}

impl fmt::Display for NodeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{} {} {}:{} {}:{}/>",
            self.label, self.ref_id, self.node_label, self.nodes, self.content_label, self.contents
        )
    }
}
