//! Spec selection, concurrent log loading, and result assembly.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, warn};

use super::matcher::{match_entry, Needle, Origin};
use super::types::{QueryRequest, QueryResponse};
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::implog::{LogEntry, LogStore};
use crate::ports::paths::ListError;

/// Maximum number of rows returned by one search.
pub const MAX_RESULTS: usize = 100;

/// A spec selected for searching.
struct SpecRef {
    name: String,
    archived: bool,
    dir: PathBuf,
}

/// Searches implementation logs for `request.search_term`.
///
/// Spec logs are loaded concurrently on the blocking pool; rows are
/// reassembled in enumeration order (active specs by name, then archived
/// specs by name) regardless of which load finishes first. A spec whose log
/// cannot be loaded is skipped.
///
/// # Errors
///
/// Returns a validation error for a blank term (before any I/O) and
/// [`Error::SpecNotFound`] when a named spec exists in neither namespace.
pub async fn search(ctx: &Arc<ServiceContext>, request: &QueryRequest) -> Result<QueryResponse> {
    let term = request.search_term.trim();
    if term.is_empty() {
        return Err(Error::validation(
            "searchTerm is required and must not be blank",
            "Pass a keyword such as an endpoint path, component, or class name",
        ));
    }
    let needle = Needle::new(term);
    let filter = request.artifact_type.unwrap_or_default();
    let spec_name = request.spec_name.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let specs = select_specs(ctx, spec_name)?;
    debug!(term, %filter, specs = specs.len(), "searching implementation logs");
    let loaded = load_all(ctx, &specs).await;

    let mut matches = Vec::new();
    let mut logs_searched = 0;
    for (spec, entries) in specs.iter().zip(loaded) {
        let Some(entries) = entries else { continue };
        logs_searched += entries.len();
        let origin = Origin { spec_name: &spec.name, archived: spec.archived };
        for entry in &entries {
            matches.extend(match_entry(&origin, entry, &needle, filter));
        }
    }

    let total_matches = matches.len();
    let truncated = total_matches > MAX_RESULTS;
    matches.truncate(MAX_RESULTS);

    Ok(QueryResponse {
        matches,
        search_term: term.to_string(),
        specs_searched: specs.len(),
        logs_searched,
        total_matches,
        truncated,
    })
}

fn select_specs(ctx: &ServiceContext, spec_name: Option<&str>) -> Result<Vec<SpecRef>> {
    if let Some(name) = spec_name {
        for archived in [false, true] {
            let dir = ctx.spec_dir(name, archived)?;
            if ctx.fs.exists(&dir) {
                return Ok(vec![SpecRef { name: name.to_string(), archived, dir }]);
            }
        }
        return Err(Error::SpecNotFound(name.to_string()));
    }

    let mut specs = Vec::new();
    for archived in [false, true] {
        match ctx.paths.list_spec_directories(archived) {
            Ok(names) => specs.extend(names.into_iter().map(|name| SpecRef {
                dir: ctx.paths.resolve(&name, archived),
                name,
                archived,
            })),
            Err(ListError::RootMissing(root)) => {
                debug!(root = %root.display(), "spec root missing, nothing to search there");
            }
            Err(e) => warn!(archived, error = %e, "skipping unreadable spec root"),
        }
    }
    Ok(specs)
}

/// Loads every spec's entries; `None` marks a spec that failed to load.
async fn load_all(ctx: &Arc<ServiceContext>, specs: &[SpecRef]) -> Vec<Option<Vec<LogEntry>>> {
    let mut set = JoinSet::new();
    for (index, spec) in specs.iter().enumerate() {
        let ctx = Arc::clone(ctx);
        let dir = spec.dir.clone();
        set.spawn_blocking(move || (index, LogStore::new(&ctx, &dir).get_all_logs()));
    }

    let mut loaded: Vec<Option<Vec<LogEntry>>> = specs.iter().map(|_| None).collect();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, Ok(entries))) => loaded[index] = Some(entries),
            Ok((index, Err(e))) => {
                warn!(spec = %specs[index].name, error = %e, "skipping spec with unreadable log");
            }
            Err(e) => warn!(error = %e, "log load task failed"),
        }
    }
    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryFileSystem;
    use crate::implog::{LineCounts, NewLogEntry};
    use crate::ports::FileSystem;
    use crate::query::{ArtifactFilter, MatchType};
    use serde_json::{json, Value};
    use std::path::Path;

    fn context() -> (MemoryFileSystem, Arc<ServiceContext>) {
        let fs = MemoryFileSystem::new();
        let ctx = ServiceContext::deterministic(fs.clone(), Path::new("/w"));
        (fs, Arc::new(ctx))
    }

    fn log(ctx: &ServiceContext, dir: &str, task_id: &str, summary: &str, artifacts: Value) {
        LogStore::new(ctx, Path::new(dir))
            .add_log_entry(NewLogEntry {
                task_id: task_id.to_string(),
                summary: summary.to_string(),
                timestamp: None,
                files_modified: vec!["services/user.ts".into()],
                files_created: vec![],
                lines: LineCounts::default(),
                artifacts: serde_json::from_value(artifacts).unwrap(),
            })
            .unwrap();
    }

    fn user_service(ctx: &ServiceContext, dir: &str) {
        log(
            ctx,
            dir,
            "1",
            "Created user service",
            json!({"classes": [{"name": "UserService", "location": "services/user.ts"}]}),
        );
    }

    #[tokio::test]
    async fn finds_class_by_name() {
        let (_fs, ctx) = context();
        user_service(&ctx, "/w/specs/auth");

        let response = search(&ctx, &QueryRequest::new("UserService")).await.unwrap();

        assert_eq!(response.matches.len(), 1);
        let row = &response.matches[0];
        assert_eq!(row.artifact.kind, MatchType::Class);
        assert_eq!(row.artifact.data["name"], "UserService");
        assert_eq!(row.spec_name, "auth");
        assert!(!row.is_archived);
        assert_eq!(response.specs_searched, 1);
        assert!(!response.truncated);
    }

    #[tokio::test]
    async fn no_match_still_counts_logs() {
        let (_fs, ctx) = context();
        user_service(&ctx, "/w/specs/auth");

        let response = search(&ctx, &QueryRequest::new("zzz-nonexistent")).await.unwrap();

        assert!(response.matches.is_empty());
        assert!(response.logs_searched >= 1);
        assert_eq!(response.total_matches, 0);
    }

    #[tokio::test]
    async fn blank_term_is_rejected() {
        let (_fs, ctx) = context();
        let err = search(&ctx, &QueryRequest::new("   ")).await.unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[tokio::test]
    async fn caps_rows_and_reports_true_total() {
        let (_fs, ctx) = context();
        for n in 0..150 {
            log(
                &ctx,
                "/w/specs/bulk",
                "1",
                &format!("entry {n}"),
                json!({"functions": [{"name": format!("handler{n}")}]}),
            );
        }

        let response = search(&ctx, &QueryRequest::new("handler")).await.unwrap();

        assert_eq!(response.matches.len(), MAX_RESULTS);
        assert_eq!(response.total_matches, 150);
        assert!(response.truncated);
        assert_eq!(response.logs_searched, 150);
        assert_eq!(response.matches[0].artifact.data["name"], "handler0");
        assert_eq!(response.matches[99].artifact.data["name"], "handler99");
    }

    #[tokio::test]
    async fn named_archived_spec_is_found_and_tagged() {
        let (_fs, ctx) = context();
        user_service(&ctx, "/w/archive/specs/legacy");

        let mut request = QueryRequest::new("userservice");
        request.spec_name = Some("legacy".into());
        let response = search(&ctx, &request).await.unwrap();

        assert_eq!(response.matches.len(), 1);
        assert!(response.matches[0].is_archived);
    }

    #[tokio::test]
    async fn named_active_spec_shadows_archived_one() {
        let (_fs, ctx) = context();
        user_service(&ctx, "/w/specs/auth");
        user_service(&ctx, "/w/archive/specs/auth");

        let mut request = QueryRequest::new("UserService");
        request.spec_name = Some("auth".into());
        let response = search(&ctx, &request).await.unwrap();

        assert_eq!(response.matches.len(), 1);
        assert!(!response.matches[0].is_archived);
    }

    #[tokio::test]
    async fn unknown_spec_name_is_not_found() {
        let (_fs, ctx) = context();
        user_service(&ctx, "/w/specs/auth");

        let mut request = QueryRequest::new("UserService");
        request.spec_name = Some("ghost".into());
        let err = search(&ctx, &request).await.unwrap_err();

        assert!(matches!(err, Error::SpecNotFound(name) if name == "ghost"));
    }

    #[tokio::test]
    async fn spec_name_with_separator_is_rejected() {
        let (_fs, ctx) = context();
        user_service(&ctx, "/w/specs/auth");

        let mut request = QueryRequest::new("UserService");
        request.spec_name = Some("../specs/auth".into());
        let err = search(&ctx, &request).await.unwrap_err();

        assert!(matches!(err, Error::Validation { .. }));
    }

    #[tokio::test]
    async fn missing_roots_mean_zero_specs() {
        let (_fs, ctx) = context();
        let response = search(&ctx, &QueryRequest::new("anything")).await.unwrap();

        assert_eq!(response.specs_searched, 0);
        assert_eq!(response.logs_searched, 0);
    }

    #[tokio::test]
    async fn corrupt_spec_is_skipped() {
        let (fs, ctx) = context();
        user_service(&ctx, "/w/specs/alpha");
        fs.write(Path::new("/w/specs/broken/implementation-log.json"), "[[[").unwrap();
        user_service(&ctx, "/w/specs/zeta");

        let response = search(&ctx, &QueryRequest::new("UserService")).await.unwrap();

        assert_eq!(response.specs_searched, 3);
        assert_eq!(response.logs_searched, 2);
        let specs: Vec<_> = response.matches.iter().map(|m| m.spec_name.as_str()).collect();
        assert_eq!(specs, vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn rows_follow_enumeration_then_append_order() {
        let (_fs, ctx) = context();
        for spec in ["/w/specs/c", "/w/specs/a", "/w/archive/specs/b", "/w/specs/b"] {
            for task in ["1", "2"] {
                log(&ctx, spec, task, "wired cache", json!({"integrations": [{"description": "x"}]}));
            }
        }

        let response = search(&ctx, &QueryRequest::new("cache")).await.unwrap();

        let order: Vec<_> = response
            .matches
            .iter()
            .map(|m| (m.spec_name.as_str(), m.is_archived, m.task_id.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("a", false, "1"),
                ("a", false, "2"),
                ("b", false, "1"),
                ("b", false, "2"),
                ("c", false, "1"),
                ("c", false, "2"),
                ("b", true, "1"),
                ("b", true, "2"),
            ]
        );
        assert!(response.matches.iter().all(|m| m.artifact.kind == MatchType::Summary));
    }

    #[tokio::test]
    async fn type_filter_limits_artifact_matches() {
        let (_fs, ctx) = context();
        log(
            &ctx,
            "/w/specs/web",
            "3",
            "profile page",
            json!({
                "components": [{"name": "UserCard"}],
                "apiEndpoints": [{"method": "GET", "path": "/api/user"}]
            }),
        );

        let mut request = QueryRequest::new("user");
        request.artifact_type = Some("components".parse::<ArtifactFilter>().unwrap());
        let response = search(&ctx, &request).await.unwrap();

        assert_eq!(response.matches.len(), 1);
        assert_eq!(response.matches[0].artifact.kind, MatchType::Component);
    }
}
