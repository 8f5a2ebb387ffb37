//! Runtime configuration.
//!
//! Sources, lowest precedence first: built-in defaults, `specledger.yaml` in
//! the project root, environment variables (after loading `.env`), and the
//! `--project` flag.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Name of the optional per-project config file.
pub const CONFIG_FILE: &str = "specledger.yaml";

const DEFAULT_WORKFLOW_DIR: &str = ".spec-workflow";
const DEFAULT_LOG_FILTER: &str = "specledger=warn";

/// Resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Project whose workflow directory holds the specs.
    pub project_root: PathBuf,
    /// Workflow directory name relative to the project root.
    pub workflow_dir: String,
    /// `tracing_subscriber` filter directive.
    pub log_filter: String,
}

/// Keys accepted in `specledger.yaml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    workflow_dir: Option<String>,
    log_filter: Option<String>,
}

impl Config {
    /// Defaults rooted at `project_root`.
    #[must_use]
    pub fn with_project_root(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            workflow_dir: DEFAULT_WORKFLOW_DIR.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    /// Loads configuration from `.env`, the process environment, and the
    /// project's `specledger.yaml`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `specledger.yaml` exists but cannot be
    /// read or parsed.
    pub fn load(project_override: Option<&Path>) -> Result<Self> {
        // A missing .env is the common case.
        let _ = dotenvy::dotenv();
        Self::from_sources(project_override, |key| std::env::var(key).ok())
    }

    fn from_sources(
        project_override: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let project_root = project_override
            .map(Path::to_path_buf)
            .or_else(|| env("SPECLEDGER_PROJECT_ROOT").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        let mut config = Self::with_project_root(project_root);

        let file = read_file_config(&config.project_root.join(CONFIG_FILE))?;
        if let Some(dir) = file.workflow_dir {
            config.workflow_dir = dir;
        }
        if let Some(filter) = file.log_filter {
            config.log_filter = filter;
        }

        if let Some(dir) = env("SPECLEDGER_WORKFLOW_DIR") {
            config.workflow_dir = dir;
        }
        if let Some(filter) = env("SPECLEDGER_LOG").or_else(|| env("RUST_LOG")) {
            config.log_filter = filter;
        }
        Ok(config)
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;
    serde_yaml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {e}", path.display())))
}
