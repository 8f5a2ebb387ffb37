//! `specledger log` command.

use crate::cli::LogArgs;
use crate::context::ServiceContext;
use crate::error::Error;
use crate::implog::{append_entry, AppendRequest, LineCounts};

use super::{print_json, render_failure};

/// Execute the `log` command.
///
/// Prints the append response (entry id, stored entry, task totals) as JSON.
///
/// # Errors
///
/// Returns the rendered failure if the artifacts JSON is malformed or the
/// append is rejected.
pub fn run(ctx: &ServiceContext, args: &LogArgs) -> Result<(), String> {
    let request = build_request(args).map_err(|e| render_failure(&e))?;
    let response = append_entry(ctx, request).map_err(|e| render_failure(&e))?;
    print_json(&response)
}

fn build_request(args: &LogArgs) -> Result<AppendRequest, Error> {
    let artifacts = serde_json::from_str(&args.artifacts).map_err(|e| {
        Error::validation(
            format!("--artifacts is not a valid artifacts object: {e}"),
            r#"Pass JSON such as '{"functions":[{"name":"parseTasks","location":"src/tasks.rs"}]}'"#,
        )
    })?;
    Ok(AppendRequest {
        spec_name: args.spec.clone(),
        task_id: args.task.clone(),
        summary: args.summary.clone(),
        files_modified: args.files_modified.clone(),
        files_created: args.files_created.clone(),
        statistics: LineCounts { lines_added: args.lines_added, lines_removed: args.lines_removed },
        artifacts: Some(artifacts),
    })
}
