//! Log entry records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::artifacts::Artifacts;

/// Line counts supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineCounts {
    /// Lines added.
    #[serde(default)]
    pub lines_added: u64,
    /// Lines removed.
    #[serde(default)]
    pub lines_removed: u64,
}

/// Stored statistics. `files_changed` is always derived from the file lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Lines added.
    pub lines_added: u64,
    /// Lines removed.
    pub lines_removed: u64,
    /// `files_modified.len() + files_created.len()`.
    pub files_changed: u64,
}

/// An entry before the store has assigned its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLogEntry {
    /// Task the work was done for.
    pub task_id: String,
    /// Free-text description of the work.
    pub summary: String,
    /// Capture time; stamped from the clock when `None`.
    pub timestamp: Option<DateTime<Utc>>,
    /// Paths edited, as given.
    pub files_modified: Vec<String>,
    /// Paths added, as given.
    pub files_created: Vec<String>,
    /// Caller-supplied line counts.
    pub lines: LineCounts,
    /// Produced artifacts; at least one sequence must be non-empty.
    pub artifacts: Artifacts,
}

/// One immutable record of work performed against a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Identifier unique within the spec's collection.
    pub id: String,
    /// Task the work was done for.
    pub task_id: String,
    /// When the entry was appended.
    pub timestamp: DateTime<Utc>,
    /// Free-text description of the work.
    pub summary: String,
    /// Paths edited.
    #[serde(default)]
    pub files_modified: Vec<String>,
    /// Paths added.
    #[serde(default)]
    pub files_created: Vec<String>,
    /// Line and file totals.
    pub statistics: Statistics,
    /// Produced artifacts.
    #[serde(default)]
    pub artifacts: Artifacts,
}

impl LogEntry {
    /// Builds the stored form of `new`, deriving `files_changed`.
    pub(crate) fn assemble(id: String, timestamp: DateTime<Utc>, new: NewLogEntry) -> Self {
        let files_changed = (new.files_modified.len() + new.files_created.len()) as u64;
        Self {
            id,
            task_id: new.task_id,
            timestamp,
            summary: new.summary,
            files_modified: new.files_modified,
            files_created: new.files_created,
            statistics: Statistics {
                lines_added: new.lines.lines_added,
                lines_removed: new.lines.lines_removed,
                files_changed,
            },
            artifacts: new.artifacts,
        }
    }
}
