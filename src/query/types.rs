//! Query request and response shapes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::implog::ArtifactKind;

/// Which artifact sequences a query inspects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ArtifactFilter {
    /// All five sequences.
    #[default]
    All,
    /// A single sequence.
    Only(ArtifactKind),
}

impl ArtifactFilter {
    /// `true` when `kind` is selected.
    #[must_use]
    pub fn includes(self, kind: ArtifactKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == kind,
        }
    }
}

impl FromStr for ArtifactFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse::<ArtifactKind>().map(Self::Only).map_err(|_| {
            format!(
                "unknown artifact type '{s}': expected one of apiEndpoints, components, \
                 functions, classes, integrations, all"
            )
        })
    }
}

impl TryFrom<String> for ArtifactFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ArtifactFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(kind) => fmt::Display::fmt(kind, f),
        }
    }
}

/// Search request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// Keyword to look for; must be non-empty after trimming.
    pub search_term: String,
    /// Restrict the search to one spec (active or archived).
    #[serde(default)]
    pub spec_name: Option<String>,
    /// Restrict artifact matching to one sequence.
    #[serde(default)]
    pub artifact_type: Option<ArtifactFilter>,
}

impl QueryRequest {
    /// Request searching every spec and artifact type for `term`.
    #[must_use]
    pub fn new(term: &str) -> Self {
        Self { search_term: term.to_string(), spec_name: None, artifact_type: None }
    }
}

/// Kind of a result row. `Summary` marks rows produced by a summary-only match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchType {
    /// Matched an `apiEndpoints` record.
    ApiEndpoint,
    /// Matched a `components` record.
    Component,
    /// Matched a `functions` record.
    Function,
    /// Matched a `classes` record.
    Class,
    /// Matched an `integrations` record.
    Integration,
    /// Only the entry summary matched.
    Summary,
}

impl From<ArtifactKind> for MatchType {
    fn from(kind: ArtifactKind) -> Self {
        match kind {
            ArtifactKind::ApiEndpoint => Self::ApiEndpoint,
            ArtifactKind::Component => Self::Component,
            ArtifactKind::Function => Self::Function,
            ArtifactKind::Class => Self::Class,
            ArtifactKind::Integration => Self::Integration,
        }
    }
}

/// The artifact slot of a result row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedArtifact {
    /// What matched.
    #[serde(rename = "type")]
    pub kind: MatchType,
    /// The artifact record, or `{"summary": ...}` for summary-only rows.
    pub data: Value,
}

/// Entry context shared by every row from one log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchContext {
    /// Entry summary.
    pub summary: String,
    /// Entry's modified files.
    pub files_modified: Vec<String>,
    /// Entry's created files.
    pub files_created: Vec<String>,
}

/// One result row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryMatch {
    /// Spec the entry belongs to.
    pub spec_name: String,
    /// Task the entry was logged against.
    pub task_id: String,
    /// Entry timestamp.
    pub timestamp: DateTime<Utc>,
    /// `true` when the spec lives in the archived namespace.
    pub is_archived: bool,
    /// What matched.
    pub artifact: MatchedArtifact,
    /// Surrounding entry details.
    pub context: MatchContext,
}

/// Search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    /// Rows, at most [`super::MAX_RESULTS`].
    pub matches: Vec<QueryMatch>,
    /// The trimmed term that was searched.
    pub search_term: String,
    /// Specs selected for the search, including any whose log failed to load.
    pub specs_searched: usize,
    /// Entries inspected across loaded specs.
    pub logs_searched: usize,
    /// Row count before truncation.
    pub total_matches: usize,
    /// `true` when `matches` was cut to the cap.
    pub truncated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_parses_all_and_each_kind() {
        assert_eq!("all".parse::<ArtifactFilter>().unwrap(), ArtifactFilter::All);
        assert_eq!(
            "classes".parse::<ArtifactFilter>().unwrap(),
            ArtifactFilter::Only(ArtifactKind::Class)
        );
        assert!("class".parse::<ArtifactFilter>().is_err());
    }

    #[test]
    fn request_deserializes_from_camel_case() {
        let request: QueryRequest = serde_json::from_value(json!({
            "searchTerm": "user",
            "artifactType": "apiEndpoints"
        }))
        .unwrap();
        assert_eq!(request.artifact_type, Some(ArtifactFilter::Only(ArtifactKind::ApiEndpoint)));
        assert_eq!(request.spec_name, None);
    }

    #[test]
    fn summary_rows_serialize_with_distinct_type() {
        let artifact =
            MatchedArtifact { kind: MatchType::Summary, data: json!({"summary": "text"}) };
        assert_eq!(serde_json::to_value(artifact).unwrap()["type"], "summary");
    }
}
