//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the log core and something it
//! does not own (time, ids, durable storage, workflow directory layout).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod paths;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use id_gen::IdGenerator;
pub use paths::{ListError, PathResolver};
