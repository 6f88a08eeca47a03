//! Typed payloads stored in an [`FsTree`].

use std::fmt;
use std::path::{Path, PathBuf};

use super::names::{NameMetadata, NameMetadataExtractor};
use super::provider::LocationProvider;
use crate::classify::Plain;
use crate::hierarchy::Hierarchy;

/// A hierarchy of folders holding files, classified as kinds `K`.
pub type FsTree<K = Plain> = Hierarchy<Folder<K>, File<K>>;

/// A filesystem location and what its name says about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    path: PathBuf,
    full_name: String,
    folder: PathBuf,
    name: NameMetadata,
}

impl FsEntry {
    pub fn new<X>(path: impl Into<PathBuf>, extractor: &X) -> Self
    where
        X: NameMetadataExtractor + ?Sized,
    {
        let path = path.into();
        let full_name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            // "/" and similar roots have no file name
            None => path.to_string_lossy().into_owned(),
        };
        let folder = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let name = extractor.extract(&full_name);
        Self {
            path,
            full_name,
            folder,
            name,
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The last path segment, extension included.
    #[inline]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The directory containing this entry.
    #[inline]
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    #[inline]
    pub fn name(&self) -> &NameMetadata {
        &self.name
    }

    pub fn core_name(&self) -> &str {
        &self.name.core_name
    }

    pub fn keywords(&self) -> &[String] {
        &self.name.keywords
    }

    pub fn key_values(&self) -> &[(String, String)] {
        &self.name.key_values
    }

    pub fn description(&self) -> &str {
        &self.name.description
    }

    pub fn is_hidden(&self) -> bool {
        self.full_name.starts_with('.')
    }

    /// Re-checks the location through `provider`.
    pub fn exists<P: LocationProvider + ?Sized>(&self, provider: &P) -> bool {
        provider.exists(&self.path)
    }
}

/// Node payload of an [`FsTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder<K> {
    entry: FsEntry,
    kind: K,
}

impl<K: Copy> Folder<K> {
    pub fn new(entry: FsEntry, kind: K) -> Self {
        Self { entry, kind }
    }

    #[inline]
    pub fn kind(&self) -> K {
        self.kind
    }

    #[inline]
    pub fn entry(&self) -> &FsEntry {
        &self.entry
    }

    #[inline]
    pub fn path(&self) -> &Path {
        self.entry.path()
    }
}

/// Leaf value of an [`FsTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File<K> {
    entry: FsEntry,
    kind: K,
}

impl<K: Copy> File<K> {
    pub fn new(entry: FsEntry, kind: K) -> Self {
        Self { entry, kind }
    }

    #[inline]
    pub fn kind(&self) -> K {
        self.kind
    }

    #[inline]
    pub fn entry(&self) -> &FsEntry {
        &self.entry
    }

    #[inline]
    pub fn path(&self) -> &Path {
        self.entry.path()
    }

    /// The name without its extension.
    pub fn file_name(&self) -> &str {
        self.entry.core_name()
    }

    /// The extension without the dot, or `""` when there is none.
    pub fn extension(&self) -> &str {
        self.entry.name().extension.as_deref().unwrap_or("")
    }
}

impl<K: fmt::Debug> fmt::Display for File<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:?} {}/>", self.kind, self.entry.core_name())
    }
}
