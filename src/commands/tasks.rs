//! `specledger tasks` command.

use std::fmt::Write as _;

use crate::context::ServiceContext;
use crate::error::Error;
use crate::implog::append::TASKS_FILE;
use crate::tasks::{self, ParsedTasks};

use super::render_failure;

/// Execute the `tasks` command.
///
/// Displays a table of the spec's tasks showing ID, status, and description,
/// followed by status counts and any parse warnings.
///
/// # Errors
///
/// Returns the rendered failure if the task document cannot be read.
pub fn run(ctx: &ServiceContext, spec: &str, archived: bool) -> Result<(), String> {
    let dir = ctx.spec_dir(spec, archived).map_err(|e| render_failure(&e))?;
    if !ctx.fs.exists(&dir) {
        return Err(render_failure(&Error::SpecNotFound(spec.to_string())));
    }
    let path = dir.join(TASKS_FILE);
    let document = ctx
        .fs
        .read_to_string(&path)
        .map_err(|source| render_failure(&Error::Io { path: path.clone(), source }))?;

    print!("{}", render_table(&tasks::parse(&document)));
    Ok(())
}

fn render_table(parsed: &ParsedTasks) -> String {
    let mut out = String::new();
    if parsed.tasks.is_empty() {
        out.push_str("No tasks found.\n");
    } else {
        let id_width = parsed.tasks.iter().map(|t| t.id.len()).max().unwrap_or(2).max(2);
        let status_width = "in-progress".len();

        let _ = writeln!(out, "{:<id_width$}  {:<status_width$}  DESCRIPTION", "ID", "STATUS");
        let _ = writeln!(out, "{:-<id_width$}  {:-<status_width$}  {:-<11}", "", "", "");
        for task in &parsed.tasks {
            let _ = writeln!(
                out,
                "{:<id_width$}  {:<status_width$}  {}",
                task.id,
                task.status.as_str(),
                task.description
            );
        }
    }

    let s = &parsed.summary;
    let _ = writeln!(
        out,
        "\n{} task(s): {} completed, {} in progress, {} pending.",
        s.total, s.completed, s.in_progress, s.pending
    );
    if let Some(current) = &s.in_progress_task {
        let _ = writeln!(out, "Currently in progress: {current}");
    }
    for warning in &parsed.warnings {
        let _ = writeln!(out, "warning: line {}: {}", warning.line, warning.message);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryFileSystem;
    use crate::ports::FileSystem;
    use std::path::Path;

    #[test]
    fn table_lists_tasks_summary_and_warnings() {
        let parsed = tasks::parse("- [x] 1. Models\n- [-] 1.1 Migrations\n- [~] 2. API\n");
        let table = render_table(&parsed);

        assert!(table.contains("1.1  in-progress  Migrations"));
        assert!(table.contains("3 task(s): 1 completed, 1 in progress, 1 pending."));
        assert!(table.contains("Currently in progress: 1.1"));
        assert!(table.contains("warning: line 3"));
    }

    #[test]
    fn empty_document_reports_no_tasks() {
        assert!(render_table(&tasks::parse("# Tasks\n")).starts_with("No tasks found."));
    }

    #[test]
    fn tasks_command_reads_archived_spec() {
        let fs = MemoryFileSystem::new();
        fs.write(Path::new("/w/archive/specs/old/tasks.md"), "- [x] 1. Done\n").unwrap();
        let ctx = ServiceContext::deterministic(fs, Path::new("/w"));

        assert!(run(&ctx, "old", true).is_ok());
        assert!(run(&ctx, "old", false).is_err());
    }
}
