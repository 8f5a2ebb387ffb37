//! Error types shared by the log store, the append path, and the query engine.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Result type alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced to callers of the log and search operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request was rejected before any side effect.
    #[error("{message}")]
    Validation {
        /// What was wrong with the request.
        message: String,
        /// How to fix it.
        hint: String,
    },

    /// No spec with this name exists in the searched namespaces.
    #[error("Spec not found: {0}")]
    SpecNotFound(String),

    /// The task id does not appear in the spec's current task list.
    #[error("Task {task_id} not found in spec {spec}")]
    TaskNotFound {
        /// Spec whose task list was consulted.
        spec: String,
        /// Task id that was requested.
        task_id: String,
    },

    /// A storage port call failed for a specific path.
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying port error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A stored log collection could not be decoded.
    #[error("Corrupt implementation log {}: {source}", path.display())]
    Corrupt {
        /// Collection file path.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// A log collection could not be encoded for writing.
    #[error("Failed to encode implementation log for {}: {source}", path.display())]
    Encode {
        /// Collection file path.
        path: PathBuf,
        /// Encoder error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Builds a validation error with a corrective hint.
    #[must_use]
    pub fn validation(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Validation { message: message.into(), hint: hint.into() }
    }

    /// Suggested follow-up actions for the caller.
    #[must_use]
    pub fn next_steps(&self) -> Vec<String> {
        match self {
            Self::Validation { hint, .. } => vec![hint.clone()],
            Self::SpecNotFound(name) => vec![
                format!("Check the spec name '{name}' for typos"),
                "Run `specledger search <TERM>` without --spec to search every spec".to_string(),
                "Archived specs are searched automatically; they do not need a prefix".to_string(),
            ],
            Self::TaskNotFound { spec, task_id } => vec![
                format!("Run `specledger tasks {spec}` to list valid task ids"),
                format!("Add task {task_id} to {spec}/tasks.md before logging against it"),
            ],
            Self::Io { path, .. } => vec![
                format!("Verify that {} exists and is readable", path.display()),
                "Check the project root passed with --project or SPECLEDGER_PROJECT_ROOT"
                    .to_string(),
            ],
            Self::Corrupt { path, .. } => vec![
                format!("Inspect {} for invalid JSON", path.display()),
                "Restore the file from version control if it was edited by hand".to_string(),
            ],
            Self::Encode { .. } => vec![
                "Check that artifact records hold only plain JSON values".to_string(),
                "The existing log file was left unchanged; retry the append".to_string(),
            ],
            Self::Config(_) => vec!["Fix or remove specledger.yaml in the project root".to_string()],
        }
    }
}

/// User-facing failure: a message plus suggested next actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    /// Human-readable description of what went wrong.
    pub message: String,
    /// Short list of suggested actions.
    pub next_steps: Vec<String>,
}

impl From<&Error> for Failure {
    fn from(err: &Error) -> Self {
        Self { message: err.to_string(), next_steps: err.next_steps() }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {}", self.message)?;
        if !self.next_steps.is_empty() {
            write!(f, "\n\nNext steps:")?;
            for step in &self.next_steps {
                write!(f, "\n  - {step}")?;
            }
        }
        Ok(())
    }
}
