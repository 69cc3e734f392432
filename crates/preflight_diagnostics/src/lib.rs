//! Diagnostic results, conditions, severity/impact derivation, and rendering.
//!
//! This crate provides the uniform output of every preflight check: a
//! [`DiagnosticResult`] identified by a group/kind/name triple, carrying
//! domain-qualified annotations, an ordered list of [`Condition`]s, and the
//! [`ImpactedObject`]s responsible for a failure. [`DiagnosticResult::validate`]
//! enforces the schema every reported result must satisfy, and
//! [`TerminalRenderer`] formats results for human consumption.

#![warn(missing_docs)]

pub mod annotation;
pub mod clock;
pub mod condition;
pub mod reason;
pub mod renderer;
pub mod result;
pub mod severity;

pub use annotation::{validate_annotation_key, AnnotationKeyError};
pub use condition::{Condition, ConditionError, ConditionStatus};
pub use renderer::{ResultRenderer, TerminalRenderer};
pub use result::{DiagnosticResult, ImpactedObject, ResultStatus, ValidationError};
pub use severity::{Impact, Severity};
