//! Executor behavior over a mixed set of checks: isolation, applicability
//! filtering, cancellation, deadlines, and the result validity guarantee.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use preflight_checks::{
    AccessError, Check, CheckError, CheckExecution, CheckGroup, CheckMeta, CheckRegistry,
    Executor, FailureStage, RunContext, RunSummary, StaticAccessor, Target,
};
use preflight_diagnostics::{reason, Condition, ConditionStatus, DiagnosticResult, ResultStatus};

#[derive(Clone, Copy)]
enum Outcome {
    Pass,
    Error,
    NotApplicable,
    Empty,
    CancelRun,
}

struct Scripted {
    meta: CheckMeta,
    outcome: Outcome,
    validated: Arc<AtomicUsize>,
}

impl Check for Scripted {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    fn can_apply(&self, _ctx: &RunContext, _target: &Target) -> Result<bool, CheckError> {
        Ok(!matches!(self.outcome, Outcome::NotApplicable))
    }

    fn validate(&self, ctx: &RunContext, _target: &Target) -> Result<DiagnosticResult, CheckError> {
        self.validated.fetch_add(1, Ordering::SeqCst);
        let passed = self.meta.new_result().with_condition(
            Condition::new(reason::TYPE_VALIDATED, ConditionStatus::True)
                .with_reason(reason::REQUIREMENTS_MET),
        );
        match self.outcome {
            Outcome::Pass | Outcome::NotApplicable => Ok(passed),
            Outcome::Error => Err(AccessError::ServiceUnavailable("503".into()).into()),
            Outcome::Empty => Ok(self.meta.new_result()),
            Outcome::CancelRun => {
                ctx.cancel();
                Ok(passed)
            }
        }
    }
}

struct Harness {
    registry: CheckRegistry,
    validated: Arc<AtomicUsize>,
}

impl Harness {
    fn new(outcomes: &[(&str, Outcome)]) -> Self {
        let validated = Arc::new(AtomicUsize::new(0));
        let mut registry = CheckRegistry::new();
        for (id, outcome) in outcomes {
            registry
                .register(Arc::new(Scripted {
                    meta: CheckMeta::new(*id, *id, CheckGroup::Component),
                    outcome: *outcome,
                    validated: Arc::clone(&validated),
                }))
                .unwrap();
        }
        Self {
            registry,
            validated,
        }
    }

    fn run(&self, workers: usize, ctx: &RunContext) -> Vec<CheckExecution> {
        let executor = Executor::with_workers(self.registry.clone(), workers).unwrap();
        executor.execute_all(ctx, &Target::new(Arc::new(StaticAccessor::new())))
    }

    fn validated(&self) -> usize {
        self.validated.load(Ordering::SeqCst)
    }
}

#[test]
fn one_erroring_check_still_yields_n_outcomes() {
    let ids: Vec<String> = (0..12).map(|i| format!("components.c{i}")).collect();
    let outcomes: Vec<(&str, Outcome)> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), if i == 5 { Outcome::Error } else { Outcome::Pass }))
        .collect();
    let harness = Harness::new(&outcomes);

    let executions = harness.run(4, &RunContext::new());
    assert_eq!(executions.len(), 12);

    let failed: Vec<&CheckExecution> = executions
        .iter()
        .filter(|e| e.is_execution_failure())
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].check_id, "components.c5");
    assert_eq!(failed[0].result.status(), ResultStatus::Error);
    assert_eq!(failed[0].result.conditions[0].reason, reason::SERVICE_UNAVAILABLE);

    let mut seen: Vec<&str> = executions.iter().map(|e| e.check_id.as_str()).collect();
    seen.sort_unstable();
    let mut expected: Vec<&str> = ids.iter().map(String::as_str).collect();
    expected.sort_unstable();
    assert_eq!(seen, expected);
}

#[test]
fn inapplicable_checks_produce_nothing() {
    let harness = Harness::new(&[
        ("components.runs", Outcome::Pass),
        ("components.skipped", Outcome::NotApplicable),
    ]);
    let executions = harness.run(2, &RunContext::new());
    assert_eq!(executions.len(), 1);
    assert_eq!(executions[0].check_id, "components.runs");
    assert_eq!(harness.validated(), 1);
}

#[test]
fn every_result_validates() {
    let harness = Harness::new(&[
        ("components.ok", Outcome::Pass),
        ("components.err", Outcome::Error),
        ("components.empty", Outcome::Empty),
    ]);
    let executions = harness.run(3, &RunContext::new());
    assert_eq!(executions.len(), 3);
    for execution in &executions {
        assert!(
            execution.result.validate().is_ok(),
            "{} produced an invalid result",
            execution.check_id
        );
    }

    let empty = executions
        .iter()
        .find(|e| e.check_id == "components.empty")
        .unwrap();
    let failure = empty.failure.as_ref().unwrap();
    assert_eq!(failure.stage, FailureStage::Schema);
    assert_eq!(empty.result.conditions[0].reason, reason::CHECK_EXECUTION_FAILED);
}

#[test]
fn cancelled_before_dispatch_runs_nothing() {
    let harness = Harness::new(&[
        ("components.a", Outcome::Pass),
        ("components.b", Outcome::Pass),
        ("components.c", Outcome::Pass),
    ]);
    let ctx = RunContext::new();
    ctx.cancel();
    assert!(harness.run(2, &ctx).is_empty());
    assert_eq!(harness.validated(), 0);
}

#[test]
fn expired_deadline_runs_nothing() {
    let harness = Harness::new(&[("components.a", Outcome::Pass)]);
    let ctx = RunContext::new().with_deadline(Instant::now() - Duration::from_secs(1));
    assert!(harness.run(1, &ctx).is_empty());
    assert_eq!(harness.validated(), 0);
}

#[test]
fn cancellation_mid_run_stops_new_work() {
    // A single worker starts tasks one at a time in submission order; the
    // first check cancels the run, so nothing after it starts.
    let mut outcomes = vec![("components.first", Outcome::CancelRun)];
    let ids: Vec<String> = (0..20).map(|i| format!("components.later{i}")).collect();
    outcomes.extend(ids.iter().map(|id| (id.as_str(), Outcome::Pass)));
    let harness = Harness::new(&outcomes);

    let ctx = RunContext::new();
    let executions = harness.run(1, &ctx);
    assert!(ctx.is_cancelled());
    assert_eq!(executions.len(), 1);
    assert_eq!(executions[0].check_id, "components.first");
    assert_eq!(harness.validated(), 1);
}

#[test]
fn summary_over_mixed_run() {
    let harness = Harness::new(&[
        ("components.ok", Outcome::Pass),
        ("components.err", Outcome::Error),
        ("components.skip", Outcome::NotApplicable),
    ]);
    let summary = RunSummary::from_executions(&harness.run(2, &RunContext::new()));
    assert_eq!(summary.total, 2);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.errored, 1);
    assert_eq!(summary.execution_errors, 1);
    assert_eq!(summary.exit_code(), 0);
}

#[test]
fn selective_run_filters_by_pattern_and_category() {
    let harness = Harness::new(&[
        ("components.a", Outcome::Pass),
        ("components.b", Outcome::Pass),
    ]);
    let executor = Executor::with_workers(harness.registry.clone(), 2).unwrap();
    let target = Target::new(Arc::new(StaticAccessor::new()));

    let executions = executor
        .execute_selective(&RunContext::new(), &target, "*.b", "")
        .unwrap();
    assert_eq!(executions.len(), 1);
    assert_eq!(executions[0].check_id, "components.b");

    let none = executor
        .execute_selective(&RunContext::new(), &target, "*", "services")
        .unwrap();
    assert!(none.is_empty());
}
