//! Check contract, registry, and concurrent executor for upgrade preflight checks.
//!
//! Every check implements [`Check`]: an identity (held in an embedded
//! [`CheckMeta`]), an applicability predicate, and a validation function
//! producing a [`DiagnosticResult`]. Checks are collected in a
//! [`CheckRegistry`], selected by [`Pattern`], and run concurrently by the
//! [`Executor`], which turns every per-check failure into a well-formed
//! `Unknown` result instead of aborting the run.
//!
//! # Built-in checks
//!
//! - **components:** KServe serverless removal, ModelMesh removal
//! - **services:** Service Mesh removal
//! - **dependencies:** cert-manager operator presence
//! - **workloads:** running notebooks

#![warn(missing_docs)]

pub mod builtin;
mod classify;
mod context;
mod error;
mod executor;
pub mod global;
mod meta;
mod pattern;
mod registry;
mod resource;
mod sink;
mod static_accessor;
mod summary;
mod target;

pub use builtin::register_builtin_checks;
pub use classify::{classify, Classification};
pub use context::{CancellationToken, RunContext};
pub use error::{CheckError, ExecutorError, RegistryError};
pub use executor::{CheckExecution, ExecutionFailure, Executor, FailureStage};
pub use meta::{CheckGroup, CheckMeta, ParseGroupError};
pub use pattern::Pattern;
pub use registry::CheckRegistry;
pub use resource::{AccessError, Resource, ResourceAccessor};
pub use sink::ExecutionSink;
pub use static_accessor::{Snapshot, SnapshotError, StaticAccessor};
pub use summary::RunSummary;
pub use target::Target;

use preflight_diagnostics::DiagnosticResult;
use std::fmt;

/// A single diagnostic rule evaluated against a [`Target`].
///
/// Identity comes from the embedded [`CheckMeta`] returned by
/// [`meta`](Check::meta); the provided accessors read from it. Both
/// [`can_apply`](Check::can_apply) and [`validate`](Check::validate) may
/// block on cluster reads and are called from executor worker threads.
pub trait Check: Send + Sync {
    /// Returns the check's identity and documentation.
    fn meta(&self) -> &CheckMeta;

    /// Returns the globally unique dotted ID (e.g. `components.kserve.serverless-removal`).
    fn id(&self) -> &str {
        &self.meta().id
    }

    /// Returns the human-readable name.
    fn name(&self) -> &str {
        &self.meta().name
    }

    /// Returns what the check verifies.
    fn description(&self) -> &str {
        &self.meta().description
    }

    /// Returns operator guidance for resolving a failure.
    fn remediation(&self) -> &str {
        &self.meta().remediation
    }

    /// Returns the check's category.
    fn group(&self) -> CheckGroup {
        self.meta().group
    }

    /// Creates an empty result carrying this check's identity.
    fn new_result(&self) -> DiagnosticResult {
        self.meta().new_result()
    }

    /// Decides whether the check is meaningful for this target.
    ///
    /// Returning `Ok(false)` silently skips the check. An error is reported
    /// like a validation error.
    fn can_apply(&self, ctx: &RunContext, target: &Target) -> Result<bool, CheckError>;

    /// Runs the check and returns its result.
    fn validate(&self, ctx: &RunContext, target: &Target) -> Result<DiagnosticResult, CheckError>;
}

impl fmt::Debug for dyn Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Check").field(&self.id()).finish()
    }
}
