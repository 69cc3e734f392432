//! Individual True/False/Unknown judgments within a diagnostic result.

use crate::clock::transition_time;
use crate::severity::{Impact, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tri-state outcome of a single condition.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ConditionStatus {
    /// The requirement is satisfied.
    True,
    /// The requirement is violated.
    False,
    /// The outcome could not be determined (transient error, missing permissions).
    Unknown,
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionStatus::True => write!(f, "True"),
            ConditionStatus::False => write!(f, "False"),
            ConditionStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A violated condition invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConditionError {
    /// The condition type label is empty.
    #[error("condition type must not be empty")]
    EmptyType,

    /// The reason code is empty.
    #[error("condition reason must not be empty")]
    EmptyReason,
}

/// One judgment within a [`DiagnosticResult`](crate::DiagnosticResult).
///
/// Built from the required type and status, then adjusted with the `with_*`
/// methods:
///
/// ```
/// use preflight_diagnostics::{Condition, ConditionStatus, Impact, reason};
///
/// let cond = Condition::new("Compatible", ConditionStatus::False)
///     .with_reason(reason::VERSION_INCOMPATIBLE)
///     .with_message("ModelMesh serving is removed in 3.0")
///     .with_impact(Impact::Blocking);
/// assert!(cond.validate().is_ok());
/// ```
///
/// Severity and impact are derived from the status at construction and may
/// be overridden explicitly afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Short label naming what was checked (e.g. "Ready", "Compatible").
    #[serde(rename = "type")]
    pub condition_type: String,
    /// The outcome.
    pub status: ConditionStatus,
    /// Machine-stable code explaining the status.
    pub reason: String,
    /// Human-readable detail.
    #[serde(default)]
    pub message: String,
    /// When this condition was constructed.
    pub last_transition_time: DateTime<Utc>,
    /// How serious the outcome is.
    pub severity: Severity,
    /// What the outcome means for the upgrade.
    pub impact: Impact,
    /// Operator-facing guidance for resolving a failing condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl Condition {
    /// Creates a condition with derived severity and impact and the current
    /// transition time. The reason starts empty and must be set before the
    /// condition validates.
    pub fn new(condition_type: impl Into<String>, status: ConditionStatus) -> Self {
        Self {
            condition_type: condition_type.into(),
            status,
            reason: String::new(),
            message: String::new(),
            last_transition_time: transition_time(),
            severity: Severity::for_status(status),
            impact: Impact::for_status(status),
            remediation: None,
        }
    }

    /// Sets the reason code.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Sets the human-readable message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Overrides the derived severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Overrides the derived impact.
    pub fn with_impact(mut self, impact: Impact) -> Self {
        self.impact = impact;
        self
    }

    /// Attaches remediation guidance.
    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = Some(remediation.into());
        self
    }

    /// Returns `true` if this condition reports a violated or undetermined requirement.
    pub fn is_failing(&self) -> bool {
        self.status != ConditionStatus::True
    }

    /// Returns `true` if this condition is failing and blocks the upgrade.
    pub fn is_blocking(&self) -> bool {
        self.is_failing() && self.impact == Impact::Blocking
    }

    /// Checks the condition's own invariants.
    ///
    /// Status, severity, and impact are closed enums, so only the string
    /// fields can be malformed.
    pub fn validate(&self) -> Result<(), ConditionError> {
        if self.condition_type.is_empty() {
            return Err(ConditionError::EmptyType);
        }
        if self.reason.is_empty() {
            return Err(ConditionError::EmptyReason);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reason;

    #[test]
    fn true_derives_info_and_no_impact() {
        let cond = Condition::new("Ready", ConditionStatus::True);
        assert_eq!(cond.severity, Severity::Info);
        assert_eq!(cond.impact, Impact::None);
        assert!(!cond.is_failing());
    }

    #[test]
    fn false_derives_critical_and_advisory() {
        let cond = Condition::new("Compatible", ConditionStatus::False);
        assert_eq!(cond.severity, Severity::Critical);
        assert_eq!(cond.impact, Impact::Advisory);
        assert!(cond.is_failing());
        assert!(!cond.is_blocking());
    }

    #[test]
    fn false_can_opt_into_blocking() {
        let cond =
            Condition::new("Compatible", ConditionStatus::False).with_impact(Impact::Blocking);
        assert_eq!(cond.severity, Severity::Critical);
        assert_eq!(cond.impact, Impact::Blocking);
        assert!(cond.is_blocking());
    }

    #[test]
    fn unknown_derives_warning_and_advisory() {
        let cond = Condition::new("Validated", ConditionStatus::Unknown);
        assert_eq!(cond.severity, Severity::Warning);
        assert_eq!(cond.impact, Impact::Advisory);
    }

    #[test]
    fn severity_override() {
        let cond = Condition::new("Configured", ConditionStatus::False)
            .with_severity(Severity::Warning);
        assert_eq!(cond.severity, Severity::Warning);
        assert_eq!(cond.impact, Impact::Advisory);
    }

    #[test]
    fn builder_methods() {
        let cond = Condition::new("Configured", ConditionStatus::False)
            .with_reason(reason::CONFIGURATION_INVALID)
            .with_message("bad value")
            .with_remediation("fix it");
        assert_eq!(cond.reason, "ConfigurationInvalid");
        assert_eq!(cond.message, "bad value");
        assert_eq!(cond.remediation.as_deref(), Some("fix it"));
    }

    #[test]
    fn validate_requires_type_and_reason() {
        let cond = Condition::new("", ConditionStatus::True).with_reason("Ok");
        assert_eq!(cond.validate(), Err(ConditionError::EmptyType));

        let cond = Condition::new("Ready", ConditionStatus::True);
        assert_eq!(cond.validate(), Err(ConditionError::EmptyReason));

        let cond = Condition::new("Ready", ConditionStatus::True).with_reason("Ok");
        assert!(cond.validate().is_ok());
    }

    #[test]
    fn transition_times_are_ordered() {
        let first = Condition::new("A", ConditionStatus::True);
        let second = Condition::new("B", ConditionStatus::True);
        assert!(second.last_transition_time >= first.last_transition_time);
    }

    #[test]
    fn serializes_type_field() {
        let cond = Condition::new("Ready", ConditionStatus::Unknown).with_reason("X");
        let json = serde_json::to_value(&cond).unwrap();
        assert_eq!(json["type"], "Ready");
        assert_eq!(json["status"], "Unknown");
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["impact"], "advisory");
        assert!(json.get("remediation").is_none());
    }
}
