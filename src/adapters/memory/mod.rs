//! In-memory filesystem and workflow layout sharing one tree.

pub mod filesystem;
pub mod paths;

pub use filesystem::MemoryFileSystem;
pub use paths::MemoryPaths;
