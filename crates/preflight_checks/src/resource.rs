//! Read-only cluster resource access: the object model and the accessor contract.

use preflight_diagnostics::ImpactedObject;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A cluster object as seen by checks.
///
/// `spec` and `status` are kept as raw JSON so checks can read any field
/// with a JSON pointer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// The object's kind (e.g. "DataScienceCluster").
    pub kind: String,
    /// The namespace, or `None` for cluster-scoped objects.
    #[serde(default)]
    pub namespace: Option<String>,
    /// The object's name.
    pub name: String,
    /// Object annotations.
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    /// The object's desired state.
    #[serde(default)]
    pub spec: serde_json::Value,
    /// The object's observed state.
    #[serde(default)]
    pub status: serde_json::Value,
}

impl Resource {
    /// Creates an object with empty annotations, spec, and status.
    pub fn new(kind: impl Into<String>, namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            namespace: namespace.map(str::to_string),
            name: name.into(),
            annotations: BTreeMap::new(),
            spec: serde_json::Value::Null,
            status: serde_json::Value::Null,
        }
    }

    /// Sets the spec.
    pub fn with_spec(mut self, spec: serde_json::Value) -> Self {
        self.spec = spec;
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: serde_json::Value) -> Self {
        self.status = status;
        self
    }

    /// Adds an annotation.
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    /// Looks up a string in the spec by JSON pointer (e.g. `/components/kserve/managementState`).
    pub fn spec_str(&self, pointer: &str) -> Option<&str> {
        self.spec.pointer(pointer).and_then(serde_json::Value::as_str)
    }

    /// Looks up a string in the status by JSON pointer.
    pub fn status_str(&self, pointer: &str) -> Option<&str> {
        self.status.pointer(pointer).and_then(serde_json::Value::as_str)
    }

    /// Returns a minimal reference to this object for remediation output.
    pub fn to_impacted(&self) -> ImpactedObject {
        ImpactedObject::new(&self.kind, self.namespace.as_deref(), &self.name)
    }
}

/// A failure reported by the resource accessor.
///
/// The variants are the transport classes the executor distinguishes when it
/// turns a failed check into an `Unknown` condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// The caller lacks permission (HTTP 403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The credentials were rejected (HTTP 401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The request timed out.
    #[error("timeout: {0}")]
    Timeout(String),

    /// The API server or an aggregated API was unavailable (HTTP 503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Any other access failure.
    #[error("{0}")]
    Other(String),
}

/// Read-only access to cluster resources, supplied by the caller.
///
/// Implementations must be safe to call from several executor threads at
/// once. No retry happens above this layer.
pub trait ResourceAccessor: Send + Sync {
    /// Fetches a single object; `Ok(None)` means it does not exist.
    fn get(
        &self,
        kind: &str,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Option<Resource>, AccessError>;

    /// Lists objects of a kind, in one namespace or (with `None`) across all.
    fn list(&self, kind: &str, namespace: Option<&str>) -> Result<Vec<Resource>, AccessError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn spec_pointer_lookup() {
        let dsc = Resource::new("DataScienceCluster", None, "default-dsc").with_spec(json!({
            "components": { "kserve": { "managementState": "Managed" } }
        }));
        assert_eq!(
            dsc.spec_str("/components/kserve/managementState"),
            Some("Managed")
        );
        assert_eq!(dsc.spec_str("/components/modelmeshserving/managementState"), None);
        assert_eq!(dsc.status_str("/phase"), None);
    }

    #[test]
    fn status_pointer_lookup() {
        let nb = Resource::new("Notebook", Some("team"), "wb").with_status(json!({"phase": "Running"}));
        assert_eq!(nb.status_str("/phase"), Some("Running"));
    }

    #[test]
    fn impacted_reference() {
        let nb = Resource::new("Notebook", Some("team"), "wb");
        let impacted = nb.to_impacted();
        assert_eq!(impacted.kind, "Notebook");
        assert_eq!(impacted.namespace.as_deref(), Some("team"));
        assert_eq!(impacted.name, "wb");
    }

    #[test]
    fn deserialize_with_defaults() {
        let r: Resource = serde_json::from_value(json!({"kind": "Subscription", "name": "x"})).unwrap();
        assert!(r.namespace.is_none());
        assert!(r.annotations.is_empty());
        assert!(r.spec.is_null());
    }

    #[test]
    fn access_error_display() {
        assert_eq!(
            AccessError::Unauthorized("token expired".into()).to_string(),
            "unauthorized: token expired"
        );
        assert_eq!(AccessError::Other("boom".into()).to_string(), "boom");
    }
}
