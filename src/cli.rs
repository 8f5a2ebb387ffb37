//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::query::ArtifactFilter;

/// Top-level CLI parser for `specledger`.
#[derive(Debug, Parser)]
#[command(
    name = "specledger",
    version,
    about = "Log implementation work against spec tasks and search what was built"
)]
pub struct Cli {
    /// Project root containing the workflow directory.
    #[arg(long, global = true, value_name = "DIR")]
    pub project: Option<PathBuf>,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record completed work for a task of an active spec.
    Log(LogArgs),
    /// Search logged artifacts and summaries across active and archived specs.
    Search {
        /// Keyword to search for (case-insensitive).
        term: String,
        /// Only search this spec.
        #[arg(long)]
        spec: Option<String>,
        /// Only match this artifact type (apiEndpoints, components, functions,
        /// classes, integrations, all).
        #[arg(long = "type", value_name = "TYPE")]
        artifact_type: Option<ArtifactFilter>,
    },
    /// List the parsed tasks of a spec.
    Tasks {
        /// Spec name.
        spec: String,
        /// Read from the archived namespace.
        #[arg(long)]
        archived: bool,
    },
    /// Show logged totals for one task.
    Stats {
        /// Spec name.
        spec: String,
        /// Task id.
        task: String,
    },
}

/// Arguments for `specledger log`.
#[derive(Debug, Args)]
pub struct LogArgs {
    /// Spec the task belongs to.
    #[arg(long)]
    pub spec: String,
    /// Task id as written in tasks.md (e.g. 1.2).
    #[arg(long)]
    pub task: String,
    /// What was done.
    #[arg(long)]
    pub summary: String,
    /// File that was modified; repeatable.
    #[arg(long = "modified", value_name = "PATH")]
    pub files_modified: Vec<String>,
    /// File that was created; repeatable.
    #[arg(long = "created", value_name = "PATH")]
    pub files_created: Vec<String>,
    /// Lines added.
    #[arg(long, default_value_t = 0)]
    pub lines_added: u64,
    /// Lines removed.
    #[arg(long, default_value_t = 0)]
    pub lines_removed: u64,
    /// Artifacts as a JSON object, e.g. '{"functions":[{"name":"f"}]}'.
    #[arg(long, value_name = "JSON")]
    pub artifacts: String,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use crate::implog::ArtifactKind;
    use crate::query::ArtifactFilter;
    use clap::Parser;

    #[test]
    fn parses_log_with_repeated_files() {
        let cli = Cli::parse_from([
            "specledger",
            "log",
            "--spec",
            "auth",
            "--task",
            "1.2",
            "--summary",
            "done",
            "--modified",
            "a.rs",
            "--modified",
            "b.rs",
            "--artifacts",
            "{}",
        ]);
        let Command::Log(args) = cli.command else {
            panic!("expected log command");
        };
        assert_eq!(args.files_modified, vec!["a.rs", "b.rs"]);
        assert_eq!(args.lines_added, 0);
    }

    #[test]
    fn parses_search_type_filter() {
        let cli = Cli::parse_from(["specledger", "search", "user", "--type", "classes"]);
        assert!(matches!(
            cli.command,
            Command::Search { artifact_type: Some(ArtifactFilter::Only(ArtifactKind::Class)), .. }
        ));
    }

    #[test]
    fn rejects_unknown_type_filter() {
        assert!(Cli::try_parse_from(["specledger", "search", "user", "--type", "widgets"]).is_err());
    }

    #[test]
    fn project_flag_is_global() {
        let cli = Cli::parse_from(["specledger", "tasks", "auth", "--project", "/repo"]);
        assert_eq!(cli.project.as_deref(), Some(std::path::Path::new("/repo")));
    }
}
