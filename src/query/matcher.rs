//! Matching predicate over log entries.

use serde_json::{json, Value};

use super::types::{ArtifactFilter, MatchContext, MatchType, MatchedArtifact, QueryMatch};
use crate::implog::{ArtifactKind, ArtifactRecord, LogEntry};

/// Lower-cased search term.
pub(super) struct Needle(String);

impl Needle {
    pub(super) fn new(term: &str) -> Self {
        Self(term.to_lowercase())
    }

    fn matches_text(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.0)
    }

    /// Strings match by containment; arrays match if any element does.
    fn matches_value(&self, value: &Value) -> bool {
        match value {
            Value::String(s) => self.matches_text(s),
            Value::Array(items) => items.iter().any(|item| self.matches_value(item)),
            _ => false,
        }
    }

    fn matches_record(&self, record: &ArtifactRecord) -> bool {
        record.values().any(|value| self.matches_value(value))
    }
}

/// Where an entry came from.
pub(super) struct Origin<'a> {
    pub(super) spec_name: &'a str,
    pub(super) archived: bool,
}

/// Rows contributed by one entry: one per matching artifact, else one
/// summary row if only the summary matched, else none.
pub(super) fn match_entry(
    origin: &Origin<'_>,
    entry: &LogEntry,
    needle: &Needle,
    filter: ArtifactFilter,
) -> Vec<QueryMatch> {
    let hits: Vec<(ArtifactKind, &ArtifactRecord)> = ArtifactKind::ALL
        .into_iter()
        .filter(|kind| filter.includes(*kind))
        .flat_map(|kind| entry.artifacts.get(kind).iter().map(move |record| (kind, record)))
        .filter(|(_, record)| needle.matches_record(record))
        .collect();

    let artifacts: Vec<MatchedArtifact> = if hits.is_empty() {
        if !needle.matches_text(&entry.summary) {
            return Vec::new();
        }
        vec![MatchedArtifact { kind: MatchType::Summary, data: json!({"summary": entry.summary}) }]
    } else {
        hits.into_iter()
            .map(|(kind, record)| MatchedArtifact {
                kind: kind.into(),
                data: Value::Object(record.clone()),
            })
            .collect()
    };

    let context = MatchContext {
        summary: entry.summary.clone(),
        files_modified: entry.files_modified.clone(),
        files_created: entry.files_created.clone(),
    };
    artifacts
        .into_iter()
        .map(|artifact| QueryMatch {
            spec_name: origin.spec_name.to_string(),
            task_id: entry.task_id.clone(),
            timestamp: entry.timestamp,
            is_archived: origin.archived,
            artifact,
            context: context.clone(),
        })
        .collect()
}
