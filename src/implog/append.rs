//! Validated append: checks a request against the spec's task list, then
//! hands it to the [`LogStore`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::artifacts::Artifacts;
use super::entry::{LineCounts, LogEntry, NewLogEntry};
use super::stats::TaskStats;
use super::store::LogStore;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::tasks;

/// File name of the task list inside a spec directory.
pub const TASKS_FILE: &str = "tasks.md";

/// Request to log work against one task of an active spec.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendRequest {
    /// Active spec the task belongs to.
    pub spec_name: String,
    /// Task id as written in `tasks.md`.
    pub task_id: String,
    /// What was done.
    pub summary: String,
    /// Paths edited.
    #[serde(default)]
    pub files_modified: Vec<String>,
    /// Paths added.
    #[serde(default)]
    pub files_created: Vec<String>,
    /// Line counts; `filesChanged` is never taken from the caller.
    #[serde(default)]
    pub statistics: LineCounts,
    /// Produced artifacts.
    #[serde(default)]
    pub artifacts: Option<Artifacts>,
}

/// Result of a successful append.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendResponse {
    /// Id assigned to the new entry.
    pub entry_id: String,
    /// The stored entry.
    pub entry: LogEntry,
    /// Totals for the task including the new entry.
    pub task_stats: TaskStats,
}

/// Validates `request` and appends it to the spec's implementation log.
///
/// # Errors
///
/// Validation errors for an empty summary or artifacts bag, not-found errors
/// for an unknown spec or task id, and I/O errors from the task document or
/// the log collection. The log is untouched on any failure.
pub fn append_entry(ctx: &ServiceContext, request: AppendRequest) -> Result<AppendResponse> {
    if request.summary.trim().is_empty() {
        return Err(Error::validation(
            "summary is required",
            "Describe the completed work in one or two sentences",
        ));
    }
    let artifacts = match request.artifacts {
        Some(artifacts) if !artifacts.is_empty() => artifacts,
        Some(_) | None => {
            return Err(Error::validation(
                "artifacts are required: at least one of apiEndpoints, components, functions, \
                 classes, or integrations must be non-empty",
                "Record each endpoint, component, function, class, or integration you built so \
                 later work can find it",
            ));
        }
    };

    let dir = ctx.spec_dir(&request.spec_name, false)?;
    if !ctx.fs.exists(&dir) {
        return Err(Error::SpecNotFound(request.spec_name));
    }

    let tasks_path = dir.join(TASKS_FILE);
    let document = ctx
        .fs
        .read_to_string(&tasks_path)
        .map_err(|source| Error::Io { path: tasks_path.clone(), source })?;
    let parsed = tasks::parse(&document);
    for warning in &parsed.warnings {
        warn!(path = %tasks_path.display(), line = warning.line, "{}", warning.message);
    }
    if parsed.find(&request.task_id).is_none() {
        return Err(Error::TaskNotFound { spec: request.spec_name, task_id: request.task_id });
    }
    debug!(spec = %request.spec_name, task_id = %request.task_id, "task id validated");

    let store = LogStore::new(ctx, &dir);
    let entry = store.add_log_entry(NewLogEntry {
        task_id: request.task_id,
        summary: request.summary,
        timestamp: None,
        files_modified: request.files_modified,
        files_created: request.files_created,
        lines: request.statistics,
        artifacts,
    })?;
    let task_stats = store.get_task_stats(&entry.task_id)?;

    Ok(AppendResponse { entry_id: entry.id.clone(), entry, task_stats })
}
