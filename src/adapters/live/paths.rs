//! Live workflow layout rooted at a project directory.
//!
//! ```text
//! <project>/<workflow_dir>/
//!   ├── specs/<name>/             # active specs
//!   └── archive/specs/<name>/     # archived specs
//! ```

use std::io;
use std::path::{Path, PathBuf};

use crate::ports::paths::{ListError, PathResolver};

/// Resolves spec directories under `<project>/<workflow_dir>`.
pub struct WorkflowPaths {
    workflow_root: PathBuf,
}

impl WorkflowPaths {
    /// Creates a resolver for the given project root and workflow directory name.
    #[must_use]
    pub fn new(project_root: &Path, workflow_dir: &str) -> Self {
        Self { workflow_root: project_root.join(workflow_dir) }
    }

    fn specs_root(&self, archived: bool) -> PathBuf {
        if archived {
            self.workflow_root.join("archive").join("specs")
        } else {
            self.workflow_root.join("specs")
        }
    }
}

impl PathResolver for WorkflowPaths {
    fn resolve(&self, spec_name: &str, archived: bool) -> PathBuf {
        self.specs_root(archived).join(spec_name)
    }

    fn list_spec_directories(&self, archived: bool) -> Result<Vec<String>, ListError> {
        let root = self.specs_root(archived);
        let read = match std::fs::read_dir(&root) {
            Ok(read) => read,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ListError::RootMissing(root));
            }
            Err(e) => return Err(ListError::Io { path: root, source: e.into() }),
        };
        let mut names = Vec::new();
        for entry in read {
            let entry = entry.map_err(|e| ListError::Io { path: root.clone(), source: e.into() })?;
            if !entry.path().is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolves_active_and_archived_directories() {
        let paths = WorkflowPaths::new(Path::new("/project"), ".spec-workflow");
        assert_eq!(
            paths.resolve("auth", false),
            PathBuf::from("/project/.spec-workflow/specs/auth")
        );
        assert_eq!(
            paths.resolve("auth", true),
            PathBuf::from("/project/.spec-workflow/archive/specs/auth")
        );
    }

    #[test]
    fn missing_root_is_distinguished() {
        let dir = TempDir::new().unwrap();
        let paths = WorkflowPaths::new(dir.path(), ".spec-workflow");
        assert!(matches!(paths.list_spec_directories(true), Err(ListError::RootMissing(_))));
    }

    #[test]
    fn lists_only_directories_sorted() {
        let dir = TempDir::new().unwrap();
        let specs = dir.path().join(".spec-workflow/specs");
        std::fs::create_dir_all(specs.join("zeta")).unwrap();
        std::fs::create_dir_all(specs.join("alpha")).unwrap();
        std::fs::write(specs.join("README.md"), "notes").unwrap();

        let paths = WorkflowPaths::new(dir.path(), ".spec-workflow");
        assert_eq!(paths.list_spec_directories(false).unwrap(), vec!["alpha", "zeta"]);
    }
}
