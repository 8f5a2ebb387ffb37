//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};

use crate::adapters::fixed::{FixedClock, SequentialIdGenerator};
use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::id_gen::LiveIdGenerator;
use crate::adapters::live::paths::WorkflowPaths;
use crate::adapters::memory::{MemoryFileSystem, MemoryPaths};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::implog::SpecLocks;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::id_gen::IdGenerator;
use crate::ports::paths::PathResolver;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors wire up
/// different adapter implementations (live or deterministic in-memory).
pub struct ServiceContext {
    /// Clock for stamping log entries.
    pub clock: Box<dyn Clock>,
    /// Filesystem for task documents and log collections.
    pub fs: Box<dyn FileSystem>,
    /// ID generator for log entry ids.
    pub id_gen: Box<dyn IdGenerator>,
    /// Spec directory layout.
    pub paths: Box<dyn PathResolver>,
    /// Per-spec append locks shared by every store built from this context.
    pub locks: SpecLocks,
}

impl ServiceContext {
    /// Creates a live context reading and writing under `config.project_root`.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            id_gen: Box::new(LiveIdGenerator),
            paths: Box::new(WorkflowPaths::new(&config.project_root, &config.workflow_dir)),
            locks: SpecLocks::default(),
        }
    }

    /// Creates a context over an in-memory tree with reproducible time and ids.
    ///
    /// The clock starts at 2024-01-01T00:00:00Z and ticks one second per
    /// reading; ids are `log-1`, `log-2`, and so on.
    #[must_use]
    pub fn deterministic(fs: MemoryFileSystem, workflow_root: &Path) -> Self {
        Self {
            clock: Box::new(FixedClock::starting_at(epoch())),
            paths: Box::new(MemoryPaths::new(fs.clone(), workflow_root)),
            fs: Box::new(fs),
            id_gen: Box::new(SequentialIdGenerator::new("log")),
            locks: SpecLocks::default(),
        }
    }

    /// Resolves the directory of spec `name` after checking that the name is
    /// a single path component.
    ///
    /// # Errors
    ///
    /// Returns a validation error for names that are empty, `.` or `..`, or
    /// that contain a path separator.
    pub fn spec_dir(&self, name: &str, archived: bool) -> Result<PathBuf> {
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(Error::validation(
                format!("invalid spec name '{name}'"),
                "Pass the spec directory name only, without path separators or '..'",
            ));
        }
        Ok(self.paths.resolve(name, archived))
    }
}

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_context_shares_tree_between_fs_and_paths() {
        let fs = MemoryFileSystem::new();
        let ctx = ServiceContext::deterministic(fs.clone(), Path::new("/w"));
        ctx.fs.write(Path::new("/w/archive/specs/old/tasks.md"), "").unwrap();

        assert_eq!(ctx.paths.list_spec_directories(true).unwrap(), vec!["old"]);
        assert!(fs.exists(Path::new("/w/archive/specs/old/tasks.md")));
        assert_eq!(ctx.id_gen.generate_id(), "log-1");
        assert_eq!(ctx.clock.now().to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn spec_dir_rejects_names_escaping_the_namespace() {
        let ctx = ServiceContext::deterministic(MemoryFileSystem::new(), Path::new("/w"));

        for name in ["../../x", "..", ".", "", "a/b", "a\\b", "/etc"] {
            assert!(
                matches!(ctx.spec_dir(name, false), Err(Error::Validation { .. })),
                "accepted {name:?}"
            );
        }
        assert_eq!(ctx.spec_dir("auth", true).unwrap(), Path::new("/w/archive/specs/auth"));
    }

    #[test]
    fn live_context_resolves_under_project_root() {
        let config = Config::with_project_root("/project");
        let ctx = ServiceContext::live(&config);
        assert_eq!(
            ctx.paths.resolve("auth", false),
            Path::new("/project/.spec-workflow/specs/auth")
        );
    }
}
