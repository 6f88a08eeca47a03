use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::hook::Hook;

/// Whether an entry is file-like or directory-like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Directory,
}

/// A closed set of kinds an entry can be classified as.
///
/// Kinds declare their own hooks; ones without hooks are only ever reached
/// through [`default_for`](Variant::default_for).
pub trait Variant: Copy + Eq + fmt::Debug {
    /// The kind used when no hook matches.
    fn default_for(entry_type: EntryType) -> Self;

    fn directory_hooks(&self) -> Vec<Hook> {
        Vec::new()
    }

    fn file_hooks(&self) -> Vec<Hook> {
        Vec::new()
    }
}

/// The built-in kinds: a plain file or a plain folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plain {
    File,
    Folder,
}

impl Variant for Plain {
    fn default_for(entry_type: EntryType) -> Self {
        match entry_type {
            EntryType::File => Self::File,
            EntryType::Directory => Self::Folder,
        }
    }
}

/// Ordered hook tables for directories and files.
#[derive(Debug, Clone)]
pub struct Classifier<K> {
    directories: Vec<(Hook, K)>,
    files: Vec<(Hook, K)>,
}

impl<K: Variant> Default for Classifier<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K: Variant> Classifier<K> {
    /// A classifier with no hooks; everything falls back to the default kind.
    pub fn empty() -> Self {
        Self {
            directories: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Flattens the hooks of `kinds` in declaration order.
    ///
    /// When a later kind declares a hook already present, it takes over that
    /// hook at its original position.
    pub fn new(kinds: &[K]) -> Self {
        let mut classifier = Self::empty();
        for &kind in kinds {
            for hook in kind.directory_hooks() {
                classifier.register(EntryType::Directory, hook, kind);
            }
            for hook in kind.file_hooks() {
                classifier.register(EntryType::File, hook, kind);
            }
        }
        classifier
    }

    pub fn register(&mut self, entry_type: EntryType, hook: Hook, kind: K) {
        let table = self.table_mut(entry_type);
        match table.iter_mut().find(|(existing, _)| existing.same_key(&hook)) {
            Some(slot) => slot.1 = kind,
            None => table.push((hook, kind)),
        }
    }

    /// The hook table for `entry_type`, in match order.
    pub fn hooks(&self, entry_type: EntryType) -> impl Iterator<Item = (&Hook, K)> + '_ {
        self.table(entry_type).iter().map(|(hook, kind)| (hook, *kind))
    }

    /// The kind bound to the first hook matching `path`, if any.
    pub fn classify(&self, path: &Path, entry_type: EntryType) -> Option<K> {
        self.table(entry_type)
            .iter()
            .find(|(hook, _)| hook.matches(path))
            .map(|(_, kind)| *kind)
    }

    /// Like [`classify`](Self::classify), falling back to
    /// [`Variant::default_for`].
    pub fn classify_or_default(&self, path: &Path, entry_type: EntryType) -> K {
        self.classify(path, entry_type)
            .unwrap_or_else(|| K::default_for(entry_type))
    }

    fn table(&self, entry_type: EntryType) -> &[(Hook, K)] {
        match entry_type {
            EntryType::File => &self.files,
            EntryType::Directory => &self.directories,
        }
    }

    fn table_mut(&mut self, entry_type: EntryType) -> &mut Vec<(Hook, K)> {
        match entry_type {
            EntryType::File => &mut self.files,
            EntryType::Directory => &mut self.directories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Readme,
        Read,
        Source,
        Notes,
        Folder,
        Git,
        File,
    }

    impl Variant for Kind {
        fn default_for(entry_type: EntryType) -> Self {
            match entry_type {
                EntryType::File => Kind::File,
                EntryType::Directory => Kind::Folder,
            }
        }

        fn directory_hooks(&self) -> Vec<Hook> {
            match self {
                Kind::Git => vec![Hook::substring(".git")],
                _ => Vec::new(),
            }
        }

        fn file_hooks(&self) -> Vec<Hook> {
            match self {
                Kind::Readme => vec![Hook::substring("readme")],
                Kind::Read => vec![Hook::substring("read")],
                Kind::Source => vec![Hook::predicate(|path| {
                    path.extension().is_some_and(|ext| ext == "rs")
                })],
                // claims the "read" slot declared by Read
                Kind::Notes => vec![Hook::substring("read"), Hook::substring("notes")],
                _ => Vec::new(),
            }
        }
    }

    #[test]
    fn first_match_wins() {
        let classifier = Classifier::new(&[Kind::Readme, Kind::Read]);
        assert_eq!(
            classifier.classify(Path::new("/x/readme.txt"), EntryType::File),
            Some(Kind::Readme)
        );
        assert_eq!(
            classifier.classify(Path::new("/x/reader.txt"), EntryType::File),
            Some(Kind::Read)
        );
    }

    #[test]
    fn later_duplicate_overwrites_in_place() {
        let classifier = Classifier::new(&[Kind::Read, Kind::Readme, Kind::Notes]);
        let table: Vec<_> = classifier.hooks(EntryType::File).map(|(_, k)| k).collect();
        assert_eq!(table, vec![Kind::Notes, Kind::Readme, Kind::Notes]);

        // "read" is still tested first
        assert_eq!(
            classifier.classify(Path::new("/x/readme.txt"), EntryType::File),
            Some(Kind::Notes)
        );
    }

    #[test]
    fn tables_are_separate() {
        let classifier = Classifier::new(&[Kind::Git, Kind::Source]);
        assert_eq!(
            classifier.classify(Path::new("/repo/.git"), EntryType::Directory),
            Some(Kind::Git)
        );
        assert_eq!(
            classifier.classify(Path::new("/repo/.git"), EntryType::File),
            None
        );
        assert_eq!(
            classifier.classify(Path::new("/repo/main.rs"), EntryType::File),
            Some(Kind::Source)
        );
    }

    #[test]
    fn no_match_falls_back() {
        let classifier = Classifier::new(&[Kind::Readme]);
        assert_eq!(
            classifier.classify(Path::new("/x/a.txt"), EntryType::File),
            None
        );
        assert_eq!(
            classifier.classify_or_default(Path::new("/x/a.txt"), EntryType::File),
            Kind::File
        );
        assert_eq!(
            classifier.classify_or_default(Path::new("/x/dir"), EntryType::Directory),
            Kind::Folder
        );
    }

    #[test]
    fn plain_has_no_hooks() {
        let classifier = Classifier::new(&[Plain::File, Plain::Folder]);
        assert_eq!(classifier.hooks(EntryType::File).count(), 0);
        assert_eq!(
            classifier.classify_or_default(Path::new("a"), EntryType::Directory),
            Plain::Folder
        );
    }
}
