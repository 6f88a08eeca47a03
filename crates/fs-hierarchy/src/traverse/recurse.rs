//! The pre-order fold and its mutating counterpart.

use std::fmt;

use super::accumulated::Accumulated;
use crate::error::Result;
use crate::hierarchy::{join_ref_id, Child, Hierarchy, HierarchyNode};
use crate::storage::NodeIndex;

/// An entry handed to a [`Hierarchy::recurse`] closure.
pub enum Visit<'a, N, L> {
    Node {
        index: NodeIndex,
        node: &'a HierarchyNode<N, L>,
    },
    Content {
        key: &'a str,
        value: &'a L,
    },
}

impl<N, L> Clone for Visit<'_, N, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, L> Copy for Visit<'_, N, L> {}

impl<N: fmt::Debug, L: fmt::Debug> fmt::Debug for Visit<'_, N, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node { index, node } => f
                .debug_struct("Node")
                .field("index", index)
                .field("id", &node.id())
                .field("data", node.data())
                .finish(),
            Self::Content { key, value } => f
                .debug_struct("Content")
                .field("key", key)
                .field("value", value)
                .finish(),
        }
    }
}

impl<'a, N, L> Visit<'a, N, L> {
    /// The node id, or the key a leaf is stored under.
    pub fn key(&self) -> &'a str {
        match self {
            Self::Node { node, .. } => node.id(),
            Self::Content { key, .. } => key,
        }
    }

    pub fn as_node(&self) -> Option<NodeIndex> {
        match self {
            Self::Node { index, .. } => Some(*index),
            Self::Content { .. } => None,
        }
    }

    pub fn as_content(&self) -> Option<&'a L> {
        match self {
            Self::Node { .. } => None,
            Self::Content { value, .. } => Some(value),
        }
    }
}

/// What a [`Step`] of a mutating traversal points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Node(NodeIndex),
    /// The leaf stored under [`Step::key`] in [`Step::container`].
    Content,
}

/// One entry of a [`Hierarchy::recurse_mut`] traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub ref_id: String,
    pub key: String,
    pub target: Target,
    pub container: Option<NodeIndex>,
}

impl<N, L> Hierarchy<N, L> {
    /// Folds `f` over the subtree rooted at `start`, keeping only the
    /// `Some` results.
    ///
    /// `f` receives a name, the entry itself and the index of the node
    /// holding it. Nodes are named by their full ref_id, leaves by the key
    /// they are stored under. Results are always recorded under the entry's
    /// ref_id. For `start` the container is its own, which may be `None`.
    pub fn recurse<'a, R, F>(&'a self, start: NodeIndex, mut f: F) -> Result<Accumulated<R>>
    where
        F: FnMut(&str, Visit<'a, N, L>, Option<NodeIndex>) -> Option<R>,
    {
        let mut acc = Accumulated::new();
        self.fold(start, |ref_id, name, visit, container| {
            if let Some(value) = f(name, visit, container) {
                acc.push(ref_id, value);
            }
        })?;
        Ok(acc)
    }

    /// Like [`recurse`](Self::recurse) but records every visited entry,
    /// including those for which `f` returned `None`.
    pub fn recurse_uncompressed<'a, R, F>(
        &'a self,
        start: NodeIndex,
        mut f: F,
    ) -> Result<Accumulated<Option<R>>>
    where
        F: FnMut(&str, Visit<'a, N, L>, Option<NodeIndex>) -> Option<R>,
    {
        let mut acc = Accumulated::new();
        self.fold(start, |ref_id, name, visit, container| {
            let value = f(name, visit, container);
            acc.push(ref_id, value);
        })?;
        Ok(acc)
    }

    fn fold<'a, F>(&'a self, start: NodeIndex, mut record: F) -> Result<()>
    where
        F: FnMut(String, &str, Visit<'a, N, L>, Option<NodeIndex>),
    {
        let mut stack = vec![(start, self.ref_id(start)?)];

        while let Some((index, ref_id)) = stack.pop() {
            let Some(node) = self.get(index) else {
                continue;
            };

            let mut pending = Vec::new();
            for (key, child) in node.children().iter() {
                if let Child::Node(child) = child {
                    pending.push((*child, join_ref_id(&ref_id, key)));
                }
            }

            // leaves come right after their container, before any subfolder
            record(
                ref_id.clone(),
                &ref_id,
                Visit::Node { index, node },
                node.container(),
            );
            for (key, value) in node.children().contents() {
                record(
                    join_ref_id(&ref_id, key),
                    key,
                    Visit::Content { key, value },
                    Some(index),
                );
            }

            stack.extend(pending.into_iter().rev());
        }
        Ok(())
    }

    /// Walks the subtree rooted at `start` letting `f` mutate the hierarchy
    /// as it goes.
    ///
    /// The keys of a container are snapshotted once `f` has visited the
    /// container itself. Entries removed before they are reached are
    /// skipped, as are node children that have moved to another container.
    pub fn recurse_mut<F>(&mut self, start: NodeIndex, mut f: F) -> Result<()>
    where
        F: FnMut(&mut Self, &Step) -> Result<()>,
    {
        let container = self.node(start)?.container();
        let mut stack = vec![(start, self.ref_id(start)?, container)];

        while let Some((index, ref_id, container)) = stack.pop() {
            let key = match self.get(index) {
                Some(node) if node.container() == container => node.id().to_owned(),
                _ => continue,
            };
            let step = Step {
                ref_id,
                key,
                target: Target::Node(index),
                container,
            };
            f(&mut *self, &step)?;

            let Some(node) = self.get(index) else {
                continue;
            };
            let mut leaves = Vec::new();
            let mut pending = Vec::new();
            for (key, child) in node.children().iter() {
                match child {
                    Child::Content(_) => leaves.push(key.to_owned()),
                    Child::Node(child) => {
                        pending.push((*child, join_ref_id(&step.ref_id, key), Some(index)))
                    }
                }
            }

            for key in leaves {
                let present = self
                    .get(index)
                    .is_some_and(|node| node.content(&key).is_some());
                if !present {
                    continue;
                }
                let leaf = Step {
                    ref_id: join_ref_id(&step.ref_id, &key),
                    key,
                    target: Target::Content,
                    container: Some(index),
                };
                f(&mut *self, &leaf)?;
            }

            stack.extend(pending.into_iter().rev());
        }
        Ok(())
    }
}
