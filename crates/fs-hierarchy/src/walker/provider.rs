//! Where the walker reads entries from.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{HierarchyError, Result};

/// The location lookups a [`Walker`](super::Walker) needs.
///
/// `list_children` returns entries in the provider's natural order; the
/// walker never re-sorts them.
pub trait LocationProvider {
    fn exists(&self, path: &Path) -> bool;

    fn is_file_like(&self, path: &Path) -> bool;

    fn is_directory_like(&self, path: &Path) -> bool;

    /// Full paths of the immediate children of `path`.
    ///
    /// Fails with [`HierarchyError::PathNotFound`] when `path` is missing.
    fn list_children(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

impl<P: LocationProvider + ?Sized> LocationProvider for &P {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_file_like(&self, path: &Path) -> bool {
        (**self).is_file_like(path)
    }

    fn is_directory_like(&self, path: &Path) -> bool {
        (**self).is_directory_like(path)
    }

    fn list_children(&self, path: &Path) -> Result<Vec<PathBuf>> {
        (**self).list_children(path)
    }
}

/// The local filesystem, through `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl LocationProvider for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn is_file_like(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_directory_like(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_children(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let read_dir = fs::read_dir(path).map_err(|error| match error.kind() {
            io::ErrorKind::NotFound => HierarchyError::PathNotFound(path.to_path_buf()),
            _ => HierarchyError::Io(error),
        })?;

        let mut children = Vec::new();
        for entry in read_dir {
            children.push(entry?.path());
        }
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn local_fs_lookups() {
        let temp = TempDir::new().unwrap();
        File::create(temp.path().join("a.txt")).unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        let local = LocalFs::new();
        assert!(local.exists(temp.path()));
        assert!(local.is_file_like(&temp.path().join("a.txt")));
        assert!(local.is_directory_like(&temp.path().join("sub")));
        assert!(!local.is_directory_like(&temp.path().join("a.txt")));

        let mut children = local.list_children(temp.path()).unwrap();
        children.sort();
        assert_eq!(
            children,
            vec![temp.path().join("a.txt"), temp.path().join("sub")]
        );
    }

    #[test]
    fn local_fs_missing_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");

        let local = LocalFs::new();
        assert!(!local.exists(&missing));
        let err = local.list_children(&missing).unwrap_err();
        assert!(matches!(err, HierarchyError::PathNotFound(path) if path == missing));
    }
}
