//! Path resolver port for the workflow directory layout.

use std::path::PathBuf;

/// Failure to enumerate spec directories under a namespace root.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    /// The namespace root does not exist. Callers treat this as zero specs.
    #[error("spec root does not exist: {}", .0.display())]
    RootMissing(PathBuf),

    /// The root exists but could not be read.
    #[error("failed to list {}: {source}", path.display())]
    Io {
        /// Root that failed to list.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Maps spec names onto directories in the active and archived namespaces.
pub trait PathResolver: Send + Sync {
    /// Returns the directory holding `spec_name`'s task list and log file.
    ///
    /// The directory is not required to exist.
    fn resolve(&self, spec_name: &str, archived: bool) -> PathBuf;

    /// Lists spec directory names under the active or archived root, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::RootMissing`] when the root itself is absent and
    /// [`ListError::Io`] for any other read failure.
    fn list_spec_directories(&self, archived: bool) -> Result<Vec<String>, ListError>;
}
