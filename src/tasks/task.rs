//! Task records produced by the parser.

use serde::{Deserialize, Serialize};

/// Completion state derived from a task line's checkbox marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// `[ ]`, `[]`, or any unrecognised marker.
    Pending,
    /// `[-]`.
    InProgress,
    /// `[x]` or `[X]`.
    Completed,
}

impl TaskStatus {
    /// Canonical checkbox marker character for this status.
    #[must_use]
    pub fn marker(self) -> char {
        match self {
            Self::Pending => ' ',
            Self::InProgress => '-',
            Self::Completed => 'x',
        }
    }

    /// Display label used in listings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

/// One row of a spec's task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Dotted identifier exactly as written (e.g. `"3.1.4"`).
    pub id: String,
    /// Status from the checkbox marker.
    pub status: TaskStatus,
    /// Line text after the marker and identifier.
    pub description: String,
    /// Guidance from a `Prompt:` sub-line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Existing code to reuse, from a `Leverage:` sub-line.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leverage: Vec<String>,
    /// Requirement references, from a `Requirements:` sub-line.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,
}

impl Task {
    /// Nesting depth of the identifier: `"1"` is 1, `"1.2"` is 2.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.id.split('.').count()
    }
}

/// Status counts across a task list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    /// Number of tasks.
    pub total: usize,
    /// Tasks marked `[x]`.
    pub completed: usize,
    /// Tasks marked `[-]`.
    pub in_progress: usize,
    /// Everything else.
    pub pending: usize,
    /// First task currently in progress, in document order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_progress_task: Option<String>,
}

impl TaskSummary {
    /// Tallies statuses over `tasks`.
    #[must_use]
    pub fn of(tasks: &[Task]) -> Self {
        let mut summary = Self { total: tasks.len(), ..Self::default() };
        for task in tasks {
            match task.status {
                TaskStatus::Pending => summary.pending += 1,
                TaskStatus::InProgress => {
                    summary.in_progress += 1;
                    if summary.in_progress_task.is_none() {
                        summary.in_progress_task = Some(task.id.clone());
                    }
                }
                TaskStatus::Completed => summary.completed += 1,
            }
        }
        summary
    }
}
