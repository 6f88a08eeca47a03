//! Subtree-wide utilities over a walked [`FsTree`].

use fnv::FnvHashSet;

use super::entry::{File, Folder};
use crate::classify::Variant;
use crate::error::Result;
use crate::hierarchy::{Child, Hierarchy, NodeSummary};
use crate::storage::NodeIndex;
use crate::traverse::{Accumulated, Target};

impl<K: Variant> Hierarchy<Folder<K>, File<K>> {
    /// The distinct extensions of every file below `folder`. Files without
    /// an extension contribute `""`.
    pub fn gather_extensions(&self, folder: NodeIndex) -> Result<FnvHashSet<String>> {
        let extensions = self.recurse(folder, |_, visit, _| {
            visit.as_content().map(|file| file.extension().to_owned())
        })?;
        Ok(extensions.into_values().into_iter().collect())
    }

    /// Removes every file below `folder` whose extension is not in `allowed`,
    /// returning the removed files by ref_id.
    pub fn purge(&mut self, folder: NodeIndex, allowed: &[&str]) -> Result<Accumulated<File<K>>> {
        let mut removed = Accumulated::new();
        self.recurse_mut(folder, |tree, step| {
            let (Target::Content, Some(container)) = (step.target, step.container) else {
                return Ok(());
            };
            let keep = match tree.node(container)?.content(&step.key) {
                Some(file) => allowed.iter().any(|ext| *ext == file.extension()),
                None => true,
            };
            if keep {
                return Ok(());
            }

            log::debug!("purging {}", step.ref_id);
            if let Child::Content(file) = tree.delete(container, &step.key)? {
                removed.push(step.ref_id.clone(), file);
            }
            Ok(())
        })?;
        Ok(removed)
    }

    /// Summary of `folder` labelled with folder and file counts.
    pub fn folder_summary(&self, folder: NodeIndex) -> Result<NodeSummary> {
        Ok(self
            .summary(folder)?
            .with_labels("Folder", "folders", "files"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Plain;
    use crate::walker::{FsEntry, FsTree, KeywordParser};

    fn folder(path: &str) -> Folder<Plain> {
        Folder::new(FsEntry::new(path, &KeywordParser), Plain::Folder)
    }

    fn file(path: &str) -> File<Plain> {
        File::new(FsEntry::new(path, &KeywordParser), Plain::File)
    }

    /// R { a.txt, LICENSE, sub { b.md, c.txt } }
    fn sample() -> (FsTree, NodeIndex, NodeIndex) {
        let mut tree = FsTree::new();
        let root = tree.create_root("R", folder("/R")).unwrap();
        tree.insert_content(root, "a.txt", file("/R/a.txt")).unwrap();
        tree.insert_content(root, "LICENSE", file("/R/LICENSE")).unwrap();
        let sub = tree.create_child(root, "sub", folder("/R/sub")).unwrap();
        tree.insert_content(sub, "b.md", file("/R/sub/b.md")).unwrap();
        tree.insert_content(sub, "c.txt", file("/R/sub/c.txt")).unwrap();
        (tree, root, sub)
    }

    #[test]
    fn gather_includes_missing_extension() {
        let (tree, root, sub) = sample();
        let all = tree.gather_extensions(root).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.contains("") && all.contains("txt") && all.contains("md"));

        let below_sub = tree.gather_extensions(sub).unwrap();
        assert_eq!(below_sub.len(), 2);
    }

    #[test]
    fn purge_keeps_allowed_extensions() {
        let (mut tree, root, sub) = sample();
        let removed = tree.purge(root, &["txt"]).unwrap();

        assert_eq!(
            removed.keys().collect::<Vec<_>>(),
            vec!["R/LICENSE", "R/sub/b.md"]
        );
        assert!(tree.node(root).unwrap().content("a.txt").is_some());
        assert!(tree.node(sub).unwrap().content("c.txt").is_some());
        assert_eq!(tree.node(sub).unwrap().children().len(), 1);
    }

    #[test]
    fn purge_with_empty_allow_list_removes_all_files() {
        let (mut tree, root, sub) = sample();
        let removed = tree.purge(root, &[]).unwrap();
        assert_eq!(removed.len(), 4);
        assert!(tree.gather_extensions(root).unwrap().is_empty());
        // folders survive
        assert_eq!(tree.nodes(root).unwrap(), vec![sub]);
    }

    #[test]
    fn folder_summary_labels() {
        let (tree, root, _) = sample();
        assert_eq!(
            tree.folder_summary(root).unwrap().to_string(),
            "<Folder R folders:1 files:2/>"
        );
    }
}
