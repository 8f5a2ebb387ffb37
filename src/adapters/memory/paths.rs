//! Workflow layout over a [`MemoryFileSystem`].

use std::path::{Path, PathBuf};

use super::filesystem::MemoryFileSystem;
use crate::ports::filesystem::FileSystem;
use crate::ports::paths::{ListError, PathResolver};

/// Same layout as the live resolver (`specs/` and `archive/specs/` under a
/// workflow root), enumerated from an in-memory tree.
pub struct MemoryPaths {
    fs: MemoryFileSystem,
    workflow_root: PathBuf,
}

impl MemoryPaths {
    /// Creates a resolver rooted at `workflow_root` inside `fs`.
    #[must_use]
    pub fn new(fs: MemoryFileSystem, workflow_root: &Path) -> Self {
        Self { fs, workflow_root: workflow_root.to_path_buf() }
    }

    fn specs_root(&self, archived: bool) -> PathBuf {
        if archived {
            self.workflow_root.join("archive").join("specs")
        } else {
            self.workflow_root.join("specs")
        }
    }
}

impl PathResolver for MemoryPaths {
    fn resolve(&self, spec_name: &str, archived: bool) -> PathBuf {
        self.specs_root(archived).join(spec_name)
    }

    fn list_spec_directories(&self, archived: bool) -> Result<Vec<String>, ListError> {
        let root = self.specs_root(archived);
        if !self.fs.is_dir(&root) {
            return Err(ListError::RootMissing(root));
        }
        let names = self
            .fs
            .list_dir(&root)
            .map_err(|source| ListError::Io { path: root.clone(), source })?;
        Ok(names.into_iter().filter(|name| self.fs.is_dir(&root.join(name))).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_spec_directories_only() {
        let fs = MemoryFileSystem::new();
        fs.create_dir_all(Path::new("/w/specs/beta"));
        fs.write(Path::new("/w/specs/alpha/tasks.md"), "").unwrap();
        fs.write(Path::new("/w/specs/stray.md"), "").unwrap();
        let paths = MemoryPaths::new(fs, Path::new("/w"));

        assert_eq!(paths.list_spec_directories(false).unwrap(), vec!["alpha", "beta"]);
        assert!(matches!(paths.list_spec_directories(true), Err(ListError::RootMissing(_))));
    }
}
