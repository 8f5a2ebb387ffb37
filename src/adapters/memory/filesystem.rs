//! In-memory filesystem adapter.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::ports::filesystem::FileSystem;

#[derive(Default)]
struct Tree {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
}

impl Tree {
    fn add_ancestors(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }
}

/// Filesystem kept in a shared map. Clones see the same tree.
#[derive(Clone, Default)]
pub struct MemoryFileSystem {
    tree: Arc<Mutex<Tree>>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `path` and all of its parents as empty directories.
    pub fn create_dir_all(&self, path: &Path) {
        let mut tree = self.tree.lock().expect("memory fs lock poisoned");
        tree.dirs.insert(path.to_path_buf());
        tree.add_ancestors(path);
    }

    /// Returns `true` if `path` is a known directory.
    #[must_use]
    pub fn is_dir(&self, path: &Path) -> bool {
        self.tree.lock().expect("memory fs lock poisoned").dirs.contains(path)
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let tree = self.tree.lock().expect("memory fs lock poisoned");
        tree.files
            .get(path)
            .cloned()
            .ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut tree = self.tree.lock().expect("memory fs lock poisoned");
        if tree.dirs.contains(path) {
            return Err(format!("Is a directory: {}", path.display()).into());
        }
        tree.add_ancestors(path);
        tree.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let tree = self.tree.lock().expect("memory fs lock poisoned");
        tree.files.contains_key(path) || tree.dirs.contains(path)
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let tree = self.tree.lock().expect("memory fs lock poisoned");
        if !tree.dirs.contains(path) {
            return Err(format!("Not a directory: {}", path.display()).into());
        }
        let names: BTreeSet<String> = tree
            .files
            .keys()
            .chain(tree.dirs.iter())
            .filter(|k| k.parent() == Some(path))
            .filter_map(|k| k.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        Ok(names.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_visible_to_clones() {
        let fs = MemoryFileSystem::new();
        let other = fs.clone();
        fs.write(Path::new("/w/specs/a/tasks.md"), "- [ ] 1. Task").unwrap();

        assert_eq!(other.read_to_string(Path::new("/w/specs/a/tasks.md")).unwrap(), "- [ ] 1. Task");
        assert!(other.is_dir(Path::new("/w/specs/a")));
    }

    #[test]
    fn list_dir_returns_files_and_directories() {
        let fs = MemoryFileSystem::new();
        fs.write(Path::new("/w/specs/a/tasks.md"), "").unwrap();
        fs.create_dir_all(Path::new("/w/specs/b"));
        fs.write(Path::new("/w/specs/notes.txt"), "").unwrap();

        assert_eq!(fs.list_dir(Path::new("/w/specs")).unwrap(), vec!["a", "b", "notes.txt"]);
    }

    #[test]
    fn list_dir_on_missing_directory_errors() {
        let fs = MemoryFileSystem::new();
        assert!(fs.list_dir(Path::new("/nowhere")).is_err());
    }
}
