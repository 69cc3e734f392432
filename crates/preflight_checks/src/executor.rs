//! Concurrent check execution with per-check failure isolation.
//!
//! The executor runs each selected check as a task on a rayon worker pool.
//! A check that is not applicable produces nothing; a check that errors,
//! panics, or returns a malformed result produces a synthesized `Unknown`
//! result, so a single bad check never prevents the rest of the run from
//! being reported.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use preflight_diagnostics::{annotation, reason, Condition, ConditionStatus, DiagnosticResult};
use serde::{Serialize, Serializer};
use tracing::{debug, debug_span, info, info_span, warn};

use crate::classify::classify;
use crate::context::RunContext;
use crate::error::{CheckError, ExecutorError};
use crate::registry::CheckRegistry;
use crate::sink::ExecutionSink;
use crate::target::Target;
use crate::Check;

/// The step of a check's execution that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureStage {
    /// `can_apply` failed.
    Applicability,
    /// `validate` failed.
    Validation,
    /// `validate` returned a result that violates the result schema.
    Schema,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureStage::Applicability => write!(f, "applicability"),
            FailureStage::Validation => write!(f, "validation"),
            FailureStage::Schema => write!(f, "schema"),
        }
    }
}

/// The original error behind a synthesized result.
#[derive(Clone, Debug, Serialize)]
pub struct ExecutionFailure {
    /// Where the check failed.
    pub stage: FailureStage,
    /// The underlying error.
    #[serde(serialize_with = "serialize_display")]
    pub error: CheckError,
}

fn serialize_display<S: Serializer>(error: &CheckError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// The outcome of running one applicable check.
///
/// `result` always passes [`DiagnosticResult::validate`]. When the check's
/// machinery failed, `result` is synthesized and `failure` holds the cause,
/// which distinguishes it from a check that reported `Unknown` itself.
#[derive(Clone, Debug, Serialize)]
pub struct CheckExecution {
    /// The ID of the check that produced this outcome.
    pub check_id: String,
    /// The validated result.
    pub result: DiagnosticResult,
    /// The failure behind a synthesized result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ExecutionFailure>,
}

impl CheckExecution {
    /// Wraps a result the check produced itself.
    pub fn completed(check: &dyn Check, result: DiagnosticResult) -> Self {
        Self {
            check_id: check.id().to_string(),
            result,
            failure: None,
        }
    }

    /// Synthesizes an `Unknown` result for a check that failed.
    pub fn failed(check: &dyn Check, stage: FailureStage, error: CheckError) -> Self {
        let classification = classify(&error);

        let mut condition = Condition::new(reason::TYPE_VALIDATED, ConditionStatus::Unknown)
            .with_reason(classification.reason)
            .with_message(classification.message);
        if let Some(hint) = classification.remediation {
            condition = condition.with_remediation(hint);
        }

        let mut result = check.meta().new_result();
        result.annotate(annotation::CHECK_ID, check.id());
        result.push_condition(condition);

        Self {
            check_id: check.id().to_string(),
            result,
            failure: Some(ExecutionFailure { stage, error }),
        }
    }

    /// Returns `true` if the check's machinery failed.
    pub fn is_execution_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// Runs checks from a registry concurrently against a target.
pub struct Executor {
    registry: CheckRegistry,
    pool: rayon::ThreadPool,
}

impl Executor {
    /// Creates an executor with rayon's default number of worker threads.
    pub fn new(registry: CheckRegistry) -> Result<Self, ExecutorError> {
        Self::with_workers(registry, 0)
    }

    /// Creates an executor with `workers` threads (0 selects rayon's default).
    pub fn with_workers(registry: CheckRegistry, workers: usize) -> Result<Self, ExecutorError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("preflight-worker-{i}"))
            .build()?;
        Ok(Self { registry, pool })
    }

    /// Returns the number of worker threads.
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Runs every registered check.
    pub fn execute_all(&self, ctx: &RunContext, target: &Target) -> Vec<CheckExecution> {
        self.execute(ctx, target, &self.registry.list_all())
    }

    /// Runs the checks selected by `pattern` and `category`.
    ///
    /// Fails only if the selection cannot be resolved.
    pub fn execute_selective(
        &self,
        ctx: &RunContext,
        target: &Target,
        pattern: &str,
        category: &str,
    ) -> Result<Vec<CheckExecution>, ExecutorError> {
        let checks = self.registry.list_by_pattern(pattern, category)?;
        Ok(self.execute(ctx, target, &checks))
    }

    /// Runs the given checks.
    ///
    /// Each check is dispatched as its own task. The context is consulted
    /// before each dispatch and again when a task starts; once it is done no
    /// further check starts, while checks already running finish normally.
    /// Checks start in the order given; the returned order follows completion.
    pub fn execute(
        &self,
        ctx: &RunContext,
        target: &Target,
        checks: &[Arc<dyn Check>],
    ) -> Vec<CheckExecution> {
        let run_span = info_span!("preflight.run", checks = checks.len());
        let _enter = run_span.enter();
        let sink = ExecutionSink::new();

        self.pool.scope_fifo(|scope| {
            for check in checks {
                if ctx.is_done() {
                    info!(
                        cancelled = ctx.is_cancelled(),
                        "run context done, not dispatching remaining checks"
                    );
                    break;
                }
                let sink = &sink;
                let run_span = &run_span;
                scope.spawn_fifo(move |_| {
                    let span = debug_span!(parent: run_span, "preflight.check", id = check.id());
                    let _enter = span.enter();
                    if ctx.is_done() {
                        debug!("run context done before start, skipping");
                        return;
                    }
                    if let Some(execution) = run_check(check.as_ref(), ctx, target) {
                        sink.push(execution);
                    }
                });
            }
        });

        debug!(
            completed = sink.len(),
            failing = sink.failing_count(),
            blocking = sink.blocking_count(),
            "run finished"
        );
        sink.take_all()
    }
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("registry", &self.registry)
            .field("workers", &self.workers())
            .finish()
    }
}

/// Evaluates one check; `None` means it does not apply.
fn run_check(check: &dyn Check, ctx: &RunContext, target: &Target) -> Option<CheckExecution> {
    match guarded(|| check.can_apply(ctx, target)) {
        Ok(true) => {}
        Ok(false) => {
            debug!("not applicable, skipping");
            return None;
        }
        Err(error) => return Some(record_failure(check, FailureStage::Applicability, error)),
    }

    let result = match guarded(|| check.validate(ctx, target)) {
        Ok(result) => result,
        Err(error) => return Some(record_failure(check, FailureStage::Validation, error)),
    };

    if let Err(error) = result.validate() {
        return Some(record_failure(
            check,
            FailureStage::Schema,
            CheckError::MalformedResult(error),
        ));
    }

    debug!(status = %result.status(), "check completed");
    Some(CheckExecution::completed(check, result))
}

fn record_failure(check: &dyn Check, stage: FailureStage, error: CheckError) -> CheckExecution {
    warn!(%stage, error = %error, "check failed");
    CheckExecution::failed(check, stage, error)
}

/// Runs `f`, converting a panic into [`CheckError::Panicked`].
fn guarded<T>(f: impl FnOnce() -> Result<T, CheckError>) -> Result<T, CheckError> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(CheckError::Panicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
