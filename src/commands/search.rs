//! `specledger search` command.

use std::sync::Arc;

use crate::context::ServiceContext;
use crate::query::{self, ArtifactFilter, QueryRequest};

use super::{print_json, render_failure};

/// Execute the `search` command.
///
/// Runs the query on a current-thread runtime and prints the response as
/// JSON. A truncated result set is also flagged on stderr.
///
/// # Errors
///
/// Returns the rendered failure for a blank term or an unknown spec.
pub fn run(
    ctx: &Arc<ServiceContext>,
    term: &str,
    spec: Option<&str>,
    artifact_type: Option<ArtifactFilter>,
) -> Result<(), String> {
    let request = QueryRequest {
        search_term: term.to_string(),
        spec_name: spec.map(String::from),
        artifact_type,
    };
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(|e| format!("Failed to start runtime: {e}"))?;
    let response =
        runtime.block_on(query::search(ctx, &request)).map_err(|e| render_failure(&e))?;

    if response.truncated {
        eprintln!(
            "Showing {} of {} matches; narrow the term or pass --spec/--type.",
            response.matches.len(),
            response.total_matches
        );
    }
    print_json(&response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryFileSystem;
    use std::path::Path;

    #[test]
    fn search_command_rejects_blank_term() {
        let ctx = Arc::new(ServiceContext::deterministic(MemoryFileSystem::new(), Path::new("/w")));
        let err = run(&ctx, "  ", None, None).unwrap_err();
        assert!(err.contains("searchTerm is required"));
    }

    #[test]
    fn search_command_reports_unknown_spec() {
        let ctx = Arc::new(ServiceContext::deterministic(MemoryFileSystem::new(), Path::new("/w")));
        let err = run(&ctx, "user", Some("ghost"), None).unwrap_err();
        assert!(err.contains("Spec not found: ghost"));
    }
}
