//! One-level scans and full depth-first walks.

use std::ops::AddAssign;
use std::path::{Path, PathBuf};

use super::entry::{File, Folder, FsEntry, FsTree};
use super::names::{KeywordParser, NameMetadataExtractor};
use super::options::WalkOptions;
use super::provider::LocationProvider;
use crate::classify::{Classifier, EntryType, Variant};
use crate::error::{HierarchyError, Result};
use crate::hierarchy::{Child, Metadata};
use crate::storage::NodeIndex;

/// How many entries a scan or walk materialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub folders: usize,
    pub files: usize,
}

impl AddAssign for WalkStats {
    fn add_assign(&mut self, other: Self) {
        self.folders += other.folders;
        self.files += other.files;
    }
}

/// Populates an [`FsTree`] from a [`LocationProvider`].
#[derive(Debug, Clone)]
pub struct Walker<P, X = KeywordParser> {
    provider: P,
    extractor: X,
    options: WalkOptions,
}

impl<P: LocationProvider> Walker<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            extractor: KeywordParser::new(),
            options: WalkOptions::default(),
        }
    }
}

impl<P: LocationProvider, X: NameMetadataExtractor> Walker<P, X> {
    /// Swaps the name metadata extractor.
    pub fn with_extractor<Y: NameMetadataExtractor>(self, extractor: Y) -> Walker<P, Y> {
        Walker {
            provider: self.provider,
            extractor,
            options: self.options,
        }
    }

    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[inline]
    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    pub fn entry(&self, path: impl Into<PathBuf>) -> FsEntry {
        FsEntry::new(path, &self.extractor)
    }

    /// Creates a root folder for `path` in `tree`.
    ///
    /// The location must exist and be directory-like. The folder is keyed by
    /// its last path segment. A filesystem root such as `/` has none and
    /// fails with [`HierarchyError::InvalidId`].
    pub fn open<K: Variant>(
        &self,
        tree: &mut FsTree<K>,
        classifier: &Classifier<K>,
        path: impl AsRef<Path>,
    ) -> Result<NodeIndex> {
        let path = path.as_ref();
        if !self.provider.exists(path) {
            return Err(HierarchyError::PathNotFound(path.to_path_buf()));
        }
        if !self.provider.is_directory_like(path) {
            return Err(HierarchyError::NotADirectory(path.to_path_buf()));
        }

        let kind = classifier.classify_or_default(path, EntryType::Directory);
        self.create_folder(tree, self.entry(path), kind)
    }

    /// Decides whether `path` is a file or a directory and which kind it is.
    ///
    /// Returns `None` for locations that are neither.
    pub fn classify<K: Variant>(
        &self,
        classifier: &Classifier<K>,
        path: &Path,
    ) -> Option<(EntryType, K)> {
        let entry_type = if self.provider.is_file_like(path) {
            EntryType::File
        } else if self.provider.is_directory_like(path) {
            EntryType::Directory
        } else {
            return None;
        };
        Some((entry_type, classifier.classify_or_default(path, entry_type)))
    }

    /// Materializes the immediate children of `folder`.
    ///
    /// Files become leaves and directories become empty folders, each keyed
    /// by its full name. Re-scanning replaces previously scanned entries.
    pub fn scan<K: Variant>(
        &self,
        tree: &mut FsTree<K>,
        classifier: &Classifier<K>,
        folder: NodeIndex,
    ) -> Result<WalkStats> {
        let path = tree.node(folder)?.data().path().to_path_buf();
        if !self.provider.exists(&path) {
            return Err(HierarchyError::PathNotFound(path));
        }

        let children = self.provider.list_children(&path)?;
        log::debug!("scanning {} ({} entries)", path.display(), children.len());

        let mut stats = WalkStats::default();
        for child in children {
            if self.options.should_ignore(&child) {
                log::debug!("skipping ignored {}", child.display());
                continue;
            }
            let entry = self.entry(child);
            if self.options.skip_hidden && entry.is_hidden() {
                log::debug!("skipping hidden {}", entry.path().display());
                continue;
            }

            match self.classify(classifier, entry.path()) {
                Some((EntryType::File, kind)) => {
                    log::trace!("file {} as {:?}", entry.path().display(), kind);
                    let key = entry.full_name().to_owned();
                    let replaced = tree.insert_content(folder, &key, File::new(entry, kind))?;
                    discard_replaced(tree, replaced)?;
                    stats.files += 1;
                }
                Some((EntryType::Directory, kind)) => {
                    log::trace!("folder {} as {:?}", entry.path().display(), kind);
                    let index = self.create_folder(tree, entry, kind)?;
                    let replaced = tree.add_node(folder, index)?;
                    discard_replaced(tree, replaced)?;
                    stats.folders += 1;
                }
                None => {
                    log::debug!(
                        "skipping {}: neither a file nor a directory",
                        entry.path().display()
                    );
                }
            }
        }
        Ok(stats)
    }

    /// Scans `folder`, then walks each subfolder in turn, depth-first.
    pub fn walk<K: Variant>(
        &self,
        tree: &mut FsTree<K>,
        classifier: &Classifier<K>,
        folder: NodeIndex,
    ) -> Result<WalkStats> {
        let mut stats = WalkStats::default();
        let mut pending = vec![(folder, 0usize)];

        while let Some((index, depth)) = pending.pop() {
            stats += self.scan(tree, classifier, index)?;
            if self.options.max_depth.is_some_and(|max| depth >= max) {
                continue;
            }
            let subfolders = tree.nodes(index)?;
            pending.extend(subfolders.into_iter().rev().map(|sub| (sub, depth + 1)));
        }

        log::info!(
            "walked {}: {} folders, {} files",
            tree.node(folder)?.data().path().display(),
            stats.folders,
            stats.files
        );
        Ok(stats)
    }

    fn create_folder<K: Variant>(
        &self,
        tree: &mut FsTree<K>,
        entry: FsEntry,
        kind: K,
    ) -> Result<NodeIndex> {
        let id = entry.full_name().to_owned();
        let metadata: Metadata = entry.key_values().iter().cloned().collect();
        tree.create_node(id, None, Folder::new(entry, kind), metadata)
    }
}

/// Frees a folder subtree that a re-scan overwrote.
fn discard_replaced<K>(tree: &mut FsTree<K>, replaced: Option<Child<File<K>>>) -> Result<()> {
    if let Some(Child::Node(old)) = replaced {
        tree.discard(old)?;
    }
    Ok(())
}
