//! `specledger stats` command.

use crate::context::ServiceContext;
use crate::error::Error;
use crate::implog::LogStore;

use super::{print_json, render_failure};

/// Execute the `stats` command for one task of an active or archived spec.
///
/// # Errors
///
/// Returns the rendered failure if the spec does not exist or its log
/// cannot be read.
pub fn run(ctx: &ServiceContext, spec: &str, task: &str) -> Result<(), String> {
    let mut found = None;
    for archived in [false, true] {
        let dir = ctx.spec_dir(spec, archived).map_err(|e| render_failure(&e))?;
        if ctx.fs.exists(&dir) {
            found = Some(dir);
            break;
        }
    }
    let dir = found.ok_or_else(|| render_failure(&Error::SpecNotFound(spec.to_string())))?;
    let stats = LogStore::new(ctx, &dir).get_task_stats(task).map_err(|e| render_failure(&e))?;
    print_json(&stats)
}
