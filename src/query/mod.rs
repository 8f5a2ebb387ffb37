//! Cross-spec search over implementation logs.
//!
//! Matching is case-insensitive substring containment over entry summaries
//! and artifact fields. There is no ranking: rows come back in spec
//! enumeration order, then append order, capped at [`MAX_RESULTS`].

mod engine;
mod matcher;
mod types;

pub use engine::{search, MAX_RESULTS};
pub use types::{
    ArtifactFilter, MatchContext, MatchType, MatchedArtifact, QueryMatch, QueryRequest,
    QueryResponse,
};
