//! Per-directory mutexes serializing appends within a process.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Registry handing out one mutex per spec directory.
///
/// Clones share the registry, so every store built from the same context
/// contends on the same lock for a given directory.
#[derive(Clone, Default)]
pub struct SpecLocks {
    inner: Arc<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>>,
}

impl SpecLocks {
    /// Returns the mutex guarding `dir`'s collection.
    #[must_use]
    pub fn for_dir(&self, dir: &Path) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(map.entry(dir.to_path_buf()).or_default())
    }
}
