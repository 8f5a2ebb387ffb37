//! Log store: persistence for one spec directory's implementation log.
//!
//! The whole collection is the unit of persistence. An append loads it,
//! pushes the new entry in memory and writes the full file back through the
//! `FileSystem` port while holding the directory's lock.

use std::path::{Path, PathBuf};
use std::sync::PoisonError;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::entry::{LogEntry, NewLogEntry};
use super::stats::TaskStats;
use crate::context::ServiceContext;
use crate::error::{Error, Result};

/// File name of the collection inside a spec directory.
pub const LOG_FILE: &str = "implementation-log.json";

/// On-disk shape of a collection.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogCollection {
    #[serde(default)]
    entries: Vec<LogEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_updated: Option<DateTime<Utc>>,
}

/// Append-only implementation log for one spec directory.
///
/// All I/O goes through `ctx.fs` so the store works against both live and
/// in-memory adapters.
pub struct LogStore<'a> {
    ctx: &'a ServiceContext,
    dir: PathBuf,
}

impl<'a> LogStore<'a> {
    /// Creates a store for the spec directory `dir`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, dir: &Path) -> Self {
        Self { ctx, dir: dir.to_path_buf() }
    }

    /// Path of the backing collection file.
    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.dir.join(LOG_FILE)
    }

    /// Appends `new` and returns the stored entry.
    ///
    /// # Errors
    ///
    /// Returns a validation error when no artifact sequence is populated,
    /// and I/O or corruption errors from loading or writing the collection.
    /// Nothing is written on failure.
    pub fn add_log_entry(&self, new: NewLogEntry) -> Result<LogEntry> {
        if new.artifacts.is_empty() {
            return Err(Error::validation(
                "artifacts must contain at least one non-empty sequence",
                "Describe what was built under apiEndpoints, components, functions, classes, \
                 or integrations",
            ));
        }
        note_missing_recommended_fields(&new);

        let lock = self.ctx.locks.for_dir(&self.dir);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut collection = self.load()?;
        let id = self.ctx.id_gen.generate_id();
        debug_assert!(
            collection.entries.iter().all(|e| e.id != id),
            "generated duplicate log entry id {id}"
        );
        let now = self.ctx.clock.now();
        let entry = LogEntry::assemble(id, new.timestamp.unwrap_or(now), new);

        collection.entries.push(entry.clone());
        collection.last_updated = Some(now);
        self.save(&collection)?;

        info!(
            dir = %self.dir.display(),
            entry_id = %entry.id,
            task_id = %entry.task_id,
            "appended implementation log entry"
        );
        Ok(entry)
    }

    /// Returns every entry in append order; empty when no log exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection exists but cannot be read or decoded.
    pub fn get_all_logs(&self) -> Result<Vec<LogEntry>> {
        Ok(self.load()?.entries)
    }

    /// Rolls up every entry logged against `task_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection exists but cannot be read or decoded.
    pub fn get_task_stats(&self, task_id: &str) -> Result<TaskStats> {
        let entries = self.get_all_logs()?;
        Ok(TaskStats::from_entries(task_id, &entries))
    }

    fn load(&self) -> Result<LogCollection> {
        let path = self.log_path();
        if !self.ctx.fs.exists(&path) {
            debug!(path = %path.display(), "no implementation log yet");
            return Ok(LogCollection::default());
        }
        let contents = self
            .ctx
            .fs
            .read_to_string(&path)
            .map_err(|source| Error::Io { path: path.clone(), source })?;
        serde_json::from_str(&contents).map_err(|source| Error::Corrupt { path, source })
    }

    fn save(&self, collection: &LogCollection) -> Result<()> {
        let path = self.log_path();
        let json = serde_json::to_string_pretty(collection)
            .map_err(|source| Error::Encode { path: path.clone(), source })?;
        self.ctx.fs.write(&path, &json).map_err(|source| Error::Io { path, source })
    }
}

fn note_missing_recommended_fields(new: &NewLogEntry) {
    for (kind, records) in new.artifacts.iter() {
        for record in records {
            let missing: Vec<&str> = kind
                .recommended_fields()
                .iter()
                .copied()
                .filter(|field| !record.contains_key(*field))
                .collect();
            if !missing.is_empty() {
                debug!(task_id = %new.task_id, %kind, ?missing, "artifact lacks recommended fields");
            }
        }
    }
}
