//! Ordered child storage for a single node.

use thin_vec::ThinVec;

use crate::storage::NodeIndex;

/// A value stored under a key in a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Child<L> {
    /// Another node in the same hierarchy.
    Node(NodeIndex),
    /// An opaque leaf value with no identity beyond its key.
    Content(L),
}

impl<L> Child<L> {
    /// Returns the node index if this child is a node.
    pub fn as_node(&self) -> Option<NodeIndex> {
        match self {
            Self::Node(index) => Some(*index),
            Self::Content(_) => None,
        }
    }

    /// Returns the content value if this child is a leaf.
    pub fn as_content(&self) -> Option<&L> {
        match self {
            Self::Node(_) => None,
            Self::Content(value) => Some(value),
        }
    }

    /// Consumes the child, returning the content value if it is a leaf.
    pub fn into_content(self) -> Option<L> {
        match self {
            Self::Node(_) => None,
            Self::Content(value) => Some(value),
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }
}

/// Insertion-ordered key to child mapping.
///
/// Re-inserting an existing key replaces the value in place, keeping its
/// position. Mutation is crate-private: all writes go through
/// [`Hierarchy`](crate::Hierarchy) so container links stay consistent.
#[derive(Debug, Clone)]
pub struct Children<L> {
    entries: ThinVec<(Box<str>, Child<L>)>,
}

impl<L> Default for Children<L> {
    fn default() -> Self {
        Self {
            entries: ThinVec::new(),
        }
    }
}

impl<L> Children<L> {
    /// Returns the number of children.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Child<L>> {
        self.position(key).map(|pos| &self.entries[pos].1)
    }

    /// Iterates over `(key, child)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Child<L>)> + '_ {
        self.entries.iter().map(|(key, child)| (key.as_ref(), child))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(key, _)| key.as_ref())
    }

    /// Node-typed children in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.entries.iter().filter_map(|(_, child)| child.as_node())
    }

    /// Leaf-typed children with their keys, in insertion order.
    pub fn contents(&self) -> impl Iterator<Item = (&str, &L)> + '_ {
        self.entries
            .iter()
            .filter_map(|(key, child)| child.as_content().map(|value| (key.as_ref(), value)))
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Child<L>> {
        self.position(key).map(|pos| &mut self.entries[pos].1)
    }

    /// Stores `child` under `key`, returning the value it replaced.
    pub(crate) fn insert(&mut self, key: &str, child: Child<L>) -> Option<Child<L>> {
        match self.position(key) {
            Some(pos) => Some(std::mem::replace(&mut self.entries[pos].1, child)),
            None => {
                self.entries.push((key.into(), child));
                None
            }
        }
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<Child<L>> {
        let pos = self.position(key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Empties the mapping, returning the removed entries in order.
    pub(crate) fn take_all(&mut self) -> ThinVec<(Box<str>, Child<L>)> {
        std::mem::take(&mut self.entries)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(existing, _)| existing.as_ref() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_preserves_order_and_replaces_in_place() {
        let mut children = Children::<u32>::default();
        assert!(children.insert("b", Child::Content(1)).is_none());
        assert!(children.insert("a", Child::Content(2)).is_none());
        children.insert("c", Child::Node(NodeIndex::new(7)));

        let replaced = children.insert("b", Child::Content(3));
        assert_eq!(replaced, Some(Child::Content(1)));

        let keys: Vec<_> = children.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(children.get("b"), Some(&Child::Content(3)));
    }

    #[test]
    fn views_split_nodes_and_contents() {
        let mut children = Children::<&str>::default();
        children.insert("x.txt", Child::Content("x"));
        children.insert("sub", Child::Node(NodeIndex::new(1)));
        children.insert("y.txt", Child::Content("y"));
        children.insert("other", Child::Node(NodeIndex::new(2)));

        let nodes: Vec<_> = children.nodes().map(|idx| idx.get()).collect();
        assert_eq!(nodes, vec![1, 2]);

        let contents: Vec<_> = children.contents().collect();
        assert_eq!(contents, vec![("x.txt", &"x"), ("y.txt", &"y")]);
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut children = Children::<u8>::default();
        for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
            children.insert(key, Child::Content(i as u8));
        }

        assert_eq!(children.remove("b"), Some(Child::Content(1)));
        assert_eq!(children.remove("b"), None);

        let keys: Vec<_> = children.keys().collect();
        assert_eq!(keys, vec!["a", "c", "d"]);
        assert_eq!(children.len(), 3);
    }

    #[test]
    fn take_all_empties() {
        let mut children = Children::<u8>::default();
        children.insert("a", Child::Content(1));
        let drained = children.take_all();
        assert_eq!(drained.len(), 1);
        assert!(children.is_empty());
    }
}
