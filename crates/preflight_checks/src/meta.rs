//! Check identity: the embeddable metadata block and the category enumeration.

use preflight_diagnostics::DiagnosticResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category a check belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckGroup {
    /// Platform components (KServe, ModelMesh, dashboard, ...).
    Component,
    /// Platform services (Service Mesh, monitoring, ...).
    Service,
    /// User workloads (notebooks, inference services, ...).
    Workload,
    /// Operators the platform depends on.
    Dependency,
    /// Cluster-wide platform configuration.
    Configuration,
}

impl CheckGroup {
    /// All groups, in declaration order.
    pub const ALL: [CheckGroup; 5] = [
        CheckGroup::Component,
        CheckGroup::Service,
        CheckGroup::Workload,
        CheckGroup::Dependency,
        CheckGroup::Configuration,
    ];

    /// Returns the category name used in check IDs, patterns, and results.
    pub fn as_str(self) -> &'static str {
        match self {
            CheckGroup::Component => "components",
            CheckGroup::Service => "services",
            CheckGroup::Workload => "workloads",
            CheckGroup::Dependency => "dependencies",
            CheckGroup::Configuration => "configuration",
        }
    }
}

impl fmt::Display for CheckGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing category names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown check category '{0}'")]
pub struct ParseGroupError(pub String);

impl FromStr for CheckGroup {
    type Err = ParseGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckGroup::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| ParseGroupError(s.to_string()))
    }
}

/// Identity and documentation shared by every check.
///
/// Checks embed one of these and return it from [`Check::meta`](crate::Check::meta).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckMeta {
    /// Globally unique dotted ID.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// What the check verifies.
    pub description: String,
    /// Operator guidance for resolving a failure.
    pub remediation: String,
    /// The check's category.
    pub group: CheckGroup,
}

impl CheckMeta {
    /// Creates metadata with empty description and remediation.
    pub fn new(id: impl Into<String>, name: impl Into<String>, group: CheckGroup) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            remediation: String::new(),
            group,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the remediation text.
    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = remediation.into();
        self
    }

    /// Returns the `(group, kind, name)` triple identifying results of this check.
    ///
    /// The ID's leading category segment is dropped; the next segment is the
    /// kind and the remainder is the name, so `components.kserve.serverless-removal`
    /// yields `("components", "kserve", "serverless-removal")`. A two-segment
    /// ID uses its last segment for both. Empty parts fall back to the group
    /// name so the triple is never empty.
    pub fn result_identity(&self) -> (String, String, String) {
        let group = self.group.as_str();
        let segments: Vec<&str> = self.id.split('.').collect();
        let rest = if segments.len() > 1 {
            &segments[1..]
        } else {
            &segments[..]
        };
        let kind = rest.first().copied().unwrap_or_default();
        let name = if rest.len() > 1 {
            rest[1..].join(".")
        } else {
            kind.to_string()
        };
        let non_empty = |s: String| if s.is_empty() { group.to_string() } else { s };
        (
            group.to_string(),
            non_empty(kind.to_string()),
            non_empty(name),
        )
    }

    /// Creates an empty result carrying this check's identity and description.
    pub fn new_result(&self) -> DiagnosticResult {
        let (group, kind, name) = self.result_identity();
        DiagnosticResult::new(group, kind, name, self.description.clone())
    }
}
