//! A deterministic in-memory location provider.

use std::path::{Path, PathBuf};

use fnv::FnvHashMap;

use super::provider::LocationProvider;
use crate::error::{HierarchyError, Result};

#[derive(Debug, Clone)]
enum MemoryEntry {
    Dir { children: Vec<PathBuf> },
    File,
}

/// Paths are stored literally. Children list in insertion order, and adding
/// an entry creates any missing parent directories.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    entries: FnvHashMap<PathBuf, MemoryEntry>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dir(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        let path = path.into();
        if !self.entries.contains_key(&path) {
            self.link_parent(&path);
            self.entries.insert(
                path,
                MemoryEntry::Dir {
                    children: Vec::new(),
                },
            );
        }
        self
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        let path = path.into();
        self.link_parent(&path);
        self.entries.insert(path, MemoryEntry::File);
        self
    }

    /// Removes `path` and everything below it. Returns false if it was absent.
    pub fn remove(&mut self, path: &Path) -> bool {
        let Some(removed) = self.entries.remove(path) else {
            return false;
        };
        if let MemoryEntry::Dir { children } = removed {
            for child in children {
                self.remove(&child);
            }
        }
        if let Some(MemoryEntry::Dir { children }) =
            path.parent().and_then(|parent| self.entries.get_mut(parent))
        {
            children.retain(|child| child != path);
        }
        true
    }

    fn link_parent(&mut self, path: &Path) {
        let Some(parent) = path.parent() else {
            return;
        };
        if parent.as_os_str().is_empty() {
            return;
        }
        if !self.entries.contains_key(parent) {
            self.link_parent(parent);
            self.entries.insert(
                parent.to_path_buf(),
                MemoryEntry::Dir {
                    children: Vec::new(),
                },
            );
        }
        if let Some(MemoryEntry::Dir { children }) = self.entries.get_mut(parent) {
            if !children.iter().any(|child| child == path) {
                children.push(path.to_path_buf());
            }
        }
    }
}

impl LocationProvider for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    fn is_file_like(&self, path: &Path) -> bool {
        matches!(self.entries.get(path), Some(MemoryEntry::File))
    }

    fn is_directory_like(&self, path: &Path) -> bool {
        matches!(self.entries.get(path), Some(MemoryEntry::Dir { .. }))
    }

    fn list_children(&self, path: &Path) -> Result<Vec<PathBuf>> {
        match self.entries.get(path) {
            Some(MemoryEntry::Dir { children }) => Ok(children.clone()),
            Some(MemoryEntry::File) => Err(HierarchyError::NotADirectory(path.to_path_buf())),
            None => Err(HierarchyError::PathNotFound(path.to_path_buf())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parents_are_created_and_ordered() {
        let mut fs = MemoryFs::new();
        fs.add_file("/r/z.txt").add_file("/r/a.txt").add_dir("/r/sub");

        assert!(fs.is_directory_like(Path::new("/r")));
        assert!(fs.is_directory_like(Path::new("/")));
        assert_eq!(
            fs.list_children(Path::new("/r")).unwrap(),
            vec![
                PathBuf::from("/r/z.txt"),
                PathBuf::from("/r/a.txt"),
                PathBuf::from("/r/sub"),
            ]
        );
    }

    #[test]
    fn remove_drops_subtree_and_link() {
        let mut fs = MemoryFs::new();
        fs.add_file("/r/sub/b.md").add_file("/r/a.txt");

        assert!(fs.remove(Path::new("/r/sub")));
        assert!(!fs.exists(Path::new("/r/sub/b.md")));
        assert_eq!(
            fs.list_children(Path::new("/r")).unwrap(),
            vec![PathBuf::from("/r/a.txt")]
        );
        assert!(!fs.remove(Path::new("/r/sub")));
    }

    #[test]
    fn listing_errors() {
        let mut fs = MemoryFs::new();
        fs.add_file("/r/a.txt");
        assert!(matches!(
            fs.list_children(Path::new("/r/a.txt")),
            Err(HierarchyError::NotADirectory(_))
        ));
        assert!(matches!(
            fs.list_children(Path::new("/nope")),
            Err(HierarchyError::PathNotFound(_))
        ));
    }
}
