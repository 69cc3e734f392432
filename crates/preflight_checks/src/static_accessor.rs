//! In-memory resource accessor backed by a fixed set of objects.
//!
//! Used by tests and by offline runs against a JSON snapshot of a cluster.

use crate::resource::{AccessError, Resource, ResourceAccessor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// A serialized cluster snapshot.
///
/// ```json
/// {
///   "resources": [ { "kind": "DataScienceCluster", "name": "default-dsc", "spec": {} } ],
///   "forbidden_kinds": [ "Notebook" ]
/// }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    /// Every object visible to checks.
    #[serde(default)]
    pub resources: Vec<Resource>,
    /// Kinds whose reads fail with [`AccessError::Forbidden`].
    #[serde(default)]
    pub forbidden_kinds: Vec<String>,
}

/// Errors that can occur when loading a snapshot file.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot file could not be read.
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot content is not valid JSON of the expected shape.
    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A [`ResourceAccessor`] over objects held in memory.
#[derive(Clone, Debug, Default)]
pub struct StaticAccessor {
    resources: Vec<Resource>,
    forbidden: BTreeSet<String>,
}

impl StaticAccessor {
    /// Creates an empty accessor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an accessor from a snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            resources: snapshot.resources,
            forbidden: snapshot.forbidden_kinds.into_iter().collect(),
        }
    }

    /// Loads a JSON snapshot file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    /// Parses a JSON snapshot from a string.
    pub fn load_from_str(content: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(content)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Adds an object and returns the accessor.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Makes every read of `kind` fail with [`AccessError::Forbidden`].
    pub fn forbid(mut self, kind: impl Into<String>) -> Self {
        self.forbidden.insert(kind.into());
        self
    }

    /// Returns the number of objects held.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if no objects are held.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    fn check_allowed(&self, kind: &str) -> Result<(), AccessError> {
        if self.forbidden.contains(kind) {
            return Err(AccessError::Forbidden(format!(
                "cannot read resources of kind {kind}"
            )));
        }
        Ok(())
    }
}

impl ResourceAccessor for StaticAccessor {
    fn get(
        &self,
        kind: &str,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Option<Resource>, AccessError> {
        self.check_allowed(kind)?;
        Ok(self
            .resources
            .iter()
            .find(|r| r.kind == kind && r.namespace.as_deref() == namespace && r.name == name)
            .cloned())
    }

    fn list(&self, kind: &str, namespace: Option<&str>) -> Result<Vec<Resource>, AccessError> {
        self.check_allowed(kind)?;
        Ok(self
            .resources
            .iter()
            .filter(|r| r.kind == kind)
            .filter(|r| namespace.is_none() || r.namespace.as_deref() == namespace)
            .cloned()
            .collect())
    }
}
