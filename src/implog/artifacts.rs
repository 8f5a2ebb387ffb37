//! Artifact bags attached to log entries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One produced artifact: an open set of fields.
pub type ArtifactRecord = Map<String, Value>;

/// The five artifact sequences a log entry can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArtifactKind {
    /// HTTP or RPC endpoint.
    ApiEndpoint,
    /// UI component.
    Component,
    /// Free function.
    Function,
    /// Class, struct, or service type.
    Class,
    /// Wiring between a frontend and a backend.
    Integration,
}

impl ArtifactKind {
    /// Every kind, in the order sequences are stored and searched.
    pub const ALL: [Self; 5] =
        [Self::ApiEndpoint, Self::Component, Self::Function, Self::Class, Self::Integration];

    /// Name of the sequence holding this kind inside an artifacts bag.
    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            Self::ApiEndpoint => "apiEndpoints",
            Self::Component => "components",
            Self::Function => "functions",
            Self::Class => "classes",
            Self::Integration => "integrations",
        }
    }

    /// Field names other tools expect on this kind. Not enforced.
    #[must_use]
    pub fn recommended_fields(self) -> &'static [&'static str] {
        match self {
            Self::ApiEndpoint => {
                &["method", "path", "purpose", "requestFormat", "responseFormat", "location"]
            }
            Self::Component => &["name", "type", "purpose", "location", "props", "exports"],
            Self::Function => &["name", "purpose", "location", "signature", "isExported"],
            Self::Class => &["name", "purpose", "location", "methods", "isExported"],
            Self::Integration => {
                &["description", "frontendComponent", "backendEndpoint", "dataFlow"]
            }
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.field_name() == s)
            .ok_or_else(|| format!("unknown artifact type: {s}"))
    }
}

/// Structured artifacts produced by one unit of work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifacts {
    /// Endpoints added or changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoints: Option<Vec<ArtifactRecord>>,
    /// Components added or changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ArtifactRecord>>,
    /// Functions added or changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<ArtifactRecord>>,
    /// Classes added or changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<ArtifactRecord>>,
    /// Integration points added or changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrations: Option<Vec<ArtifactRecord>>,
}

impl Artifacts {
    /// Records of one kind; empty when the sequence is absent.
    #[must_use]
    pub fn get(&self, kind: ArtifactKind) -> &[ArtifactRecord] {
        let seq = match kind {
            ArtifactKind::ApiEndpoint => &self.api_endpoints,
            ArtifactKind::Component => &self.components,
            ArtifactKind::Function => &self.functions,
            ArtifactKind::Class => &self.classes,
            ArtifactKind::Integration => &self.integrations,
        };
        seq.as_deref().unwrap_or_default()
    }

    /// `true` when no sequence holds at least one record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        ArtifactKind::ALL.into_iter().all(|kind| self.get(kind).is_empty())
    }

    /// Non-empty sequences in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (ArtifactKind, &[ArtifactRecord])> {
        ArtifactKind::ALL
            .into_iter()
            .map(|kind| (kind, self.get(kind)))
            .filter(|(_, records)| !records.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn present_but_empty_sequences_count_as_empty() {
        let artifacts: Artifacts =
            serde_json::from_value(json!({"functions": [], "classes": []})).unwrap();
        assert!(artifacts.is_empty());
        assert!(Artifacts::default().is_empty());
    }

    #[test]
    fn reads_camel_case_sequences() {
        let artifacts: Artifacts = serde_json::from_value(json!({
            "apiEndpoints": [{"method": "GET", "path": "/users"}],
        }))
        .unwrap();
        assert!(!artifacts.is_empty());
        assert_eq!(artifacts.get(ArtifactKind::ApiEndpoint)[0]["path"], "/users");
        assert_eq!(artifacts.iter().count(), 1);
    }

    #[test]
    fn kind_parses_from_field_name() {
        assert_eq!("apiEndpoints".parse::<ArtifactKind>().unwrap(), ArtifactKind::ApiEndpoint);
        assert!("endpoints".parse::<ArtifactKind>().is_err());
    }

    #[test]
    fn kind_serializes_singular() {
        assert_eq!(serde_json::to_value(ArtifactKind::Class).unwrap(), json!("class"));
    }
}
