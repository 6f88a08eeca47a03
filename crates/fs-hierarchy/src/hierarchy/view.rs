//! Derived properties computed from the container chain.
//!
//! Nothing here is cached: `ref_id` and depth are recomputed by walking
//! container links up to the root every time they are asked for.

use super::node::HierarchyNode;
use super::KEY_SEPARATOR;
use crate::storage::{NodeIndex, Slab};

/// A view into a node that can compute derived properties.
pub struct NodeView<'a, N, L> {
    slab: &'a Slab<HierarchyNode<N, L>>,
    index: NodeIndex,
}

impl<'a, N: 'a, L: 'a> NodeView<'a, N, L> {
    #[inline]
    pub fn new(slab: &'a Slab<HierarchyNode<N, L>>, index: NodeIndex) -> Self {
        Self { slab, index }
    }

    /// Iterates from this node up through every container to the root.
    pub fn chain(&self) -> impl Iterator<Item = NodeIndex> + 'a {
        let slab = self.slab;
        let start = slab.contains(self.index).then_some(self.index);
        std::iter::successors(start, move |&current| {
            slab.get(current).and_then(HierarchyNode::container)
        })
    }

    /// Computes the `/`-joined chain of ids from the root to this node.
    ///
    /// Returns `None` if the index does not name a live node.
    pub fn compute_ref_id(&self) -> Option<String> {
        let mut segments = Vec::new();
        for index in self.chain() {
            segments.push(self.slab.get(index)?.id());
        }
        if segments.is_empty() {
            return None;
        }

        let mut ref_id = String::new();
        for segment in segments.iter().rev() {
            if !ref_id.is_empty() {
                ref_id.push(KEY_SEPARATOR);
            }
            ref_id.push_str(segment);
        }
        Some(ref_id)
    }

    /// Computes the depth (number of containers above this node, 0 for roots).
    pub fn compute_depth(&self) -> Option<usize> {
        let count = self.chain().count();
        count.checked_sub(1)
    }

    /// Returns true if `ancestor` is this node or one of its containers.
    pub fn is_within(&self, ancestor: NodeIndex) -> bool {
        self.chain().any(|index| index == ancestor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::Hierarchy;

    #[test]
    fn test_compute_ref_id_nested() {
        let mut tree = Hierarchy::<(), ()>::new();
        let root = tree.create_root("root", ()).unwrap();
        let src = tree.create_child(root, "src", ()).unwrap();
        let lib = tree.create_child(src, "lib", ()).unwrap();

        let view = NodeView::new(tree.slab(), lib);
        assert_eq!(view.compute_ref_id(), Some("root/src/lib".to_string()));
        assert_eq!(
            NodeView::new(tree.slab(), root).compute_ref_id(),
            Some("root".to_string())
        );
    }

    #[test]
    fn test_compute_depth() {
        let mut tree = Hierarchy::<(), ()>::new();
        let a = tree.create_root("a", ()).unwrap();
        let b = tree.create_child(a, "b", ()).unwrap();
        let c = tree.create_child(b, "c", ()).unwrap();

        assert_eq!(NodeView::new(tree.slab(), a).compute_depth(), Some(0));
        assert_eq!(NodeView::new(tree.slab(), b).compute_depth(), Some(1));
        assert_eq!(NodeView::new(tree.slab(), c).compute_depth(), Some(2));
    }

    #[test]
    fn test_unknown_index() {
        let tree = Hierarchy::<(), ()>::new();
        let view = NodeView::new(tree.slab(), NodeIndex::new(3));
        assert_eq!(view.compute_ref_id(), None);
        assert_eq!(view.compute_depth(), None);
    }

    #[test]
    fn test_is_within() {
        let mut tree = Hierarchy::<(), ()>::new();
        let a = tree.create_root("a", ()).unwrap();
        let b = tree.create_child(a, "b", ()).unwrap();
        let other = tree.create_root("other", ()).unwrap();

        let view = NodeView::new(tree.slab(), b);
        assert!(view.is_within(a));
        assert!(view.is_within(b));
        assert!(!view.is_within(other));
    }
}
