//! Severity and impact classifications for condition outcomes.

use crate::condition::ConditionStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a condition's outcome is.
///
/// Ordered from least severe (`Info`) to most severe (`Critical`), matching the
/// derived `PartialOrd`/`Ord` implementation based on declaration order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational; the requirement is satisfied.
    Info,
    /// The outcome could not be fully determined or deserves attention.
    Warning,
    /// The requirement is violated.
    Critical,
}

impl Severity {
    /// Derives the default severity for a condition status.
    ///
    /// `True` is informational, `False` is critical, and `Unknown` is a warning.
    pub fn for_status(status: ConditionStatus) -> Self {
        match status {
            ConditionStatus::True => Severity::Info,
            ConditionStatus::False => Severity::Critical,
            ConditionStatus::Unknown => Severity::Warning,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// What a condition's outcome means for the guarded operation (the upgrade).
///
/// `Advisory` warns without blocking; `Blocking` prevents the operation.
/// Ordered from `None` to `Blocking`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    /// No negative consequence.
    None,
    /// Warn, but do not block.
    Advisory,
    /// Prevents the operation.
    Blocking,
}

impl Impact {
    /// Derives the default impact for a condition status.
    ///
    /// Only `True` is impact-free. A violated requirement is advisory unless
    /// the check explicitly opts into [`Impact::Blocking`].
    pub fn for_status(status: ConditionStatus) -> Self {
        match status {
            ConditionStatus::True => Impact::None,
            ConditionStatus::False | ConditionStatus::Unknown => Impact::Advisory,
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Impact::None => write!(f, "none"),
            Impact::Advisory => write!(f, "advisory"),
            Impact::Blocking => write!(f, "blocking"),
        }
    }
}
