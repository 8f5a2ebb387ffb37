//! Adapter implementations of the port traits.
//!
//! `live` talks to the real system; `memory` and `fixed` are deterministic
//! stand-ins used by tests and embedders.

pub mod fixed;
pub mod live;
pub mod memory;
