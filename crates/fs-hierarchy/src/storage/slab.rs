//! Heap-backed slab allocator.
//!
//! Vacant slots form an intrusive freelist so removed nodes leave no holes
//! that grow the arena unboundedly.

use std::mem;
use std::ops::{Index, IndexMut};

use super::index_types::NodeIndex;

#[derive(Debug, Clone)]
enum Entry<T> {
    /// Free slot linking to the next free slot.
    Vacant(usize),
    Occupied(T),
}

/// Slab of values addressed by [`NodeIndex`].
#[derive(Debug, Clone)]
pub struct Slab<T> {
    entries: Vec<Entry<T>>,
    /// Logical element count (occupied slots only).
    len: usize,
    /// Head of the freelist (index of the next available slot).
    next: usize,
}

impl<T> Default for Slab<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Slab<T> {
    /// Creates a new empty slab.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            len: 0,
            next: 0,
        }
    }

    /// Inserts a value, returning its index.
    pub fn insert(&mut self, value: T) -> NodeIndex {
        let key = self.next;
        if key == self.entries.len() {
            self.entries.push(Entry::Occupied(value));
            self.next = self.entries.len();
        } else {
            let previous = mem::replace(&mut self.entries[key], Entry::Occupied(value));
            self.next = match previous {
                Entry::Vacant(next) => next,
                Entry::Occupied(_) => unreachable!("freelist points at an occupied slot"),
            };
        }
        self.len += 1;
        NodeIndex::new(key)
    }

    /// Gets a reference to the value at `index`.
    pub fn get(&self, index: NodeIndex) -> Option<&T> {
        match self.entries.get(index.get()) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Gets a mutable reference to the value at `index`.
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut T> {
        match self.entries.get_mut(index.get()) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns true if `index` names an occupied slot.
    pub fn contains(&self, index: NodeIndex) -> bool {
        self.get(index).is_some()
    }

    /// Removes the value at `index` if it exists, returning it.
    pub fn try_remove(&mut self, index: NodeIndex) -> Option<T> {
        let slot = self.entries.get_mut(index.get())?;
        if matches!(slot, Entry::Vacant(_)) {
            return None;
        }
        match mem::replace(slot, Entry::Vacant(self.next)) {
            Entry::Occupied(value) => {
                self.len -= 1;
                self.next = index.get();
                Some(value)
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the slab is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an iterator over occupied entries.
    pub fn iter(&self) -> SlabIter<'_, T> {
        SlabIter {
            entries: self.entries.iter().enumerate(),
        }
    }
}

impl<T> Index<NodeIndex> for Slab<T> {
    type Output = T;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        match self.get(index) {
            Some(value) => value,
            None => panic!("invalid slab index {index}"),
        }
    }
}

impl<T> IndexMut<NodeIndex> for Slab<T> {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("invalid slab index {index}"),
        }
    }
}

/// Iterator over occupied entries in a Slab.
pub struct SlabIter<'a, T> {
    entries: std::iter::Enumerate<std::slice::Iter<'a, Entry<T>>>,
}

impl<'a, T> Iterator for SlabIter<'a, T> {
    type Item = (NodeIndex, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, entry) in self.entries.by_ref() {
            if let Entry::Occupied(value) = entry {
                return Some((NodeIndex::new(idx), value));
            }
        }
        None
    }
}

impl<'a, T> IntoIterator for &'a Slab<T> {
    type Item = (NodeIndex, &'a T);
    type IntoIter = SlabIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slab_basic_operations() {
        let mut slab = Slab::<i32>::new();
        assert!(slab.is_empty());

        let idx0 = slab.insert(10);
        let idx1 = slab.insert(20);
        let idx2 = slab.insert(30);

        assert_eq!(slab.len(), 3);
        assert_eq!(slab.get(idx0), Some(&10));
        assert_eq!(slab.get(idx2), Some(&30));

        // Remove middle element
        assert_eq!(slab.try_remove(idx1), Some(20));
        assert_eq!(slab.len(), 2);
        assert_eq!(slab.get(idx1), None);
        assert!(!slab.contains(idx1));
        assert_eq!(slab.try_remove(idx1), None);

        // Insert reuses freed slot
        let idx3 = slab.insert(40);
        assert_eq!(idx3, idx1);
        assert_eq!(slab.get(idx3), Some(&40));
    }

    #[test]
    fn slab_freelist_is_lifo() {
        let mut slab = Slab::<char>::new();
        let a = slab.insert('a');
        let b = slab.insert('b');
        slab.insert('c');

        slab.try_remove(a);
        slab.try_remove(b);

        assert_eq!(slab.insert('x'), b);
        assert_eq!(slab.insert('y'), a);
        assert_eq!(slab.insert('z'), NodeIndex::new(3));
    }

    #[test]
    fn slab_index_access() {
        let mut slab = Slab::<&str>::new();
        let idx = slab.insert("hello");

        assert_eq!(slab[idx], "hello");
        slab[idx] = "world";
        assert_eq!(slab[idx], "world");
    }

    #[test]
    fn slab_iteration_skips_vacant() {
        let mut slab = Slab::<i32>::new();
        slab.insert(1);
        let gap = slab.insert(2);
        slab.insert(3);
        slab.try_remove(gap);

        let items: Vec<_> = slab.iter().map(|(idx, value)| (idx.get(), *value)).collect();
        assert_eq!(items, vec![(0, 1), (2, 3)]);
    }
}
