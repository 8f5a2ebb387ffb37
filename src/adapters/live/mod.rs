//! Live adapters backed by the real clock, disk, and UUIDs.

pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod paths;
