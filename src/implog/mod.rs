//! Implementation logs: one append-only collection per spec directory.
//!
//! ```text
//! <spec dir>/
//!   ├── tasks.md                  # task list, parsed by `crate::tasks`
//!   └── implementation-log.json   # {"entries": [...], "lastUpdated": ...}
//! ```

pub mod append;
mod artifacts;
mod entry;
mod locks;
mod stats;
pub mod store;

pub use append::{append_entry, AppendRequest, AppendResponse};
pub use artifacts::{ArtifactKind, ArtifactRecord, Artifacts};
pub use entry::{LineCounts, LogEntry, NewLogEntry, Statistics};
pub use locks::SpecLocks;
pub use stats::TaskStats;
pub use store::LogStore;
