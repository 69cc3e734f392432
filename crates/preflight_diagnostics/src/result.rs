//! The uniform output of every check and its validity rules.

use crate::annotation::{validate_annotation_key, AnnotationKeyError};
use crate::condition::{Condition, ConditionError, ConditionStatus};
use crate::severity::{Impact, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A minimal reference to a live cluster object implicated by a failing condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactedObject {
    /// The object's kind (e.g. "Notebook").
    pub kind: String,
    /// The namespace, or `None` for cluster-scoped objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// The object's name.
    pub name: String,
    /// Per-object metadata for remediation guidance.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ImpactedObject {
    /// Creates a reference to an object.
    pub fn new(kind: impl Into<String>, namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            namespace: namespace.map(str::to_string),
            name: name.into(),
            annotations: BTreeMap::new(),
        }
    }

    /// Adds an annotation to this reference.
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ImpactedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{}/{}", self.kind, ns, self.name),
            None => write!(f, "{}/{}", self.kind, self.name),
        }
    }
}

/// A schema violation found by [`DiagnosticResult::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The group is empty.
    #[error("result group must not be empty")]
    EmptyGroup,

    /// The kind is empty.
    #[error("result kind must not be empty")]
    EmptyKind,

    /// The name is empty.
    #[error("result name must not be empty")]
    EmptyName,

    /// An annotation key is not in `domain.tld/key` format.
    #[error("annotation key '{key}' is not in domain/key format: {reason}")]
    InvalidAnnotationKey {
        /// The offending key.
        key: String,
        /// What is wrong with it.
        reason: AnnotationKeyError,
    },

    /// The result has no conditions.
    #[error("result must have at least one condition")]
    NoConditions,

    /// A condition failed its own validation.
    #[error("condition {index} is invalid: {source}")]
    InvalidCondition {
        /// Position of the condition in the result.
        index: usize,
        /// The condition's violation.
        source: ConditionError,
    },
}

/// Overall outcome of a result, derived from its conditions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ResultStatus {
    /// Every condition is `True`.
    Pass,
    /// At least one condition is `False`.
    Fail,
    /// No condition is `False` but at least one is `Unknown`.
    Error,
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultStatus::Pass => write!(f, "PASS"),
            ResultStatus::Fail => write!(f, "FAIL"),
            ResultStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// The structured outcome of one check execution.
///
/// Created fresh per execution, filled in by appending conditions in the
/// order the check evaluates them (the first is the primary message), and
/// validated once before it is reported.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticResult {
    /// The diagnostic's category (e.g. "components").
    pub group: String,
    /// What was examined (e.g. "kserve").
    pub kind: String,
    /// The check-specific name (e.g. "serverless-removal").
    pub name: String,
    /// A human-readable summary of what the check verifies.
    #[serde(default)]
    pub description: String,
    /// Domain-qualified free-form metadata.
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    /// Ordered judgments; never empty once validated.
    pub conditions: Vec<Condition>,
    /// Live objects responsible for failing conditions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub impacted_objects: Vec<ImpactedObject>,
}

impl DiagnosticResult {
    /// Creates an empty result ready for conditions to be appended.
    pub fn new(
        group: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            kind: kind.into(),
            name: name.into(),
            description: description.into(),
            annotations: BTreeMap::new(),
            conditions: Vec::new(),
            impacted_objects: Vec::new(),
        }
    }

    /// Sets an annotation, replacing any previous value for the key.
    pub fn annotate(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.annotations.insert(key.into(), value.into());
    }

    /// Appends a condition.
    pub fn push_condition(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    /// Records an object responsible for a failing condition.
    pub fn push_impacted(&mut self, object: ImpactedObject) {
        self.impacted_objects.push(object);
    }

    /// Adds an annotation and returns the result.
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotate(key, value);
        self
    }

    /// Appends a condition and returns the result.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.push_condition(condition);
        self
    }

    /// Checks every schema invariant, returning the first violation.
    ///
    /// Checked in order: group, kind, name, annotation keys, non-empty
    /// conditions, then each condition.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.group.is_empty() {
            return Err(ValidationError::EmptyGroup);
        }
        if self.kind.is_empty() {
            return Err(ValidationError::EmptyKind);
        }
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        for key in self.annotations.keys() {
            validate_annotation_key(key).map_err(|reason| {
                ValidationError::InvalidAnnotationKey {
                    key: key.clone(),
                    reason,
                }
            })?;
        }
        if self.conditions.is_empty() {
            return Err(ValidationError::NoConditions);
        }
        for (index, condition) in self.conditions.iter().enumerate() {
            condition
                .validate()
                .map_err(|source| ValidationError::InvalidCondition { index, source })?;
        }
        Ok(())
    }

    /// Returns `true` if any condition is `False` or `Unknown`.
    pub fn is_failing(&self) -> bool {
        self.conditions.iter().any(Condition::is_failing)
    }

    /// Returns `true` if any failing condition blocks the upgrade.
    pub fn is_blocking(&self) -> bool {
        self.conditions.iter().any(Condition::is_blocking)
    }

    /// Returns the first condition's message.
    pub fn primary_message(&self) -> Option<&str> {
        self.conditions.first().map(|c| c.message.as_str())
    }

    /// Returns the worst severity across all conditions.
    pub fn severity(&self) -> Option<Severity> {
        self.conditions.iter().map(|c| c.severity).max()
    }

    /// Returns the worst impact across all conditions.
    pub fn impact(&self) -> Option<Impact> {
        self.conditions.iter().map(|c| c.impact).max()
    }

    /// Returns the overall status: `Pass` if all conditions are `True`,
    /// otherwise `Fail` if any is `False`, otherwise `Error`.
    pub fn status(&self) -> ResultStatus {
        let mut any_unknown = false;
        for condition in &self.conditions {
            match condition.status {
                ConditionStatus::False => return ResultStatus::Fail,
                ConditionStatus::Unknown => any_unknown = true,
                ConditionStatus::True => {}
            }
        }
        if any_unknown {
            ResultStatus::Error
        } else {
            ResultStatus::Pass
        }
    }

    /// Returns the remediation attached to the first failing condition.
    pub fn remediation(&self) -> Option<&str> {
        self.conditions
            .iter()
            .filter(|c| c.is_failing())
            .find_map(|c| c.remediation.as_deref())
    }
}
