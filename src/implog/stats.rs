//! Per-task rollups computed from a log collection.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::entry::LogEntry;

/// Totals across every entry logged for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    /// Task the totals belong to.
    pub task_id: String,
    /// Number of entries.
    pub total_entries: usize,
    /// Latest entry timestamp, if any entry exists.
    pub last_timestamp: Option<DateTime<Utc>>,
    /// Sum of `lines_added`.
    pub lines_added: u64,
    /// Sum of `lines_removed`.
    pub lines_removed: u64,
    /// Sum of `files_changed`.
    pub files_changed: u64,
}

impl TaskStats {
    /// Reduces the entries whose `task_id` matches. Zero-valued when none do.
    ///
    /// Sums saturate at `u64::MAX`; line counts are caller-supplied.
    pub fn from_entries<'a>(task_id: &str, entries: impl IntoIterator<Item = &'a LogEntry>) -> Self {
        let mut stats = Self {
            task_id: task_id.to_string(),
            total_entries: 0,
            last_timestamp: None,
            lines_added: 0,
            lines_removed: 0,
            files_changed: 0,
        };
        for entry in entries.into_iter().filter(|e| e.task_id == task_id) {
            stats.total_entries += 1;
            stats.lines_added = stats.lines_added.saturating_add(entry.statistics.lines_added);
            stats.lines_removed = stats.lines_removed.saturating_add(entry.statistics.lines_removed);
            stats.files_changed = stats.files_changed.saturating_add(entry.statistics.files_changed);
            stats.last_timestamp = stats.last_timestamp.max(Some(entry.timestamp));
        }
        stats
    }
}
