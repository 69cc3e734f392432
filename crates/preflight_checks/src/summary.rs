//! Pass/fail/error counts over a run and the exit code derived from them.

use crate::executor::CheckExecution;
use preflight_diagnostics::ResultStatus;
use serde::Serialize;

/// Aggregate counts over one run's executions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Number of executions (applicable checks that ran).
    pub total: usize,
    /// Results whose conditions are all `True`.
    pub passed: usize,
    /// Results with at least one `False` condition.
    pub failed: usize,
    /// Results with `Unknown` conditions and no `False` one.
    pub errored: usize,
    /// Results that block the upgrade.
    pub blocking: usize,
    /// Executions whose result was synthesized after a failure.
    pub execution_errors: usize,
}

impl RunSummary {
    /// Tallies a set of executions.
    pub fn from_executions(executions: &[CheckExecution]) -> Self {
        let mut summary = Self::default();
        for execution in executions {
            summary.total += 1;
            match execution.result.status() {
                ResultStatus::Pass => summary.passed += 1,
                ResultStatus::Fail => summary.failed += 1,
                ResultStatus::Error => summary.errored += 1,
            }
            if execution.result.is_blocking() {
                summary.blocking += 1;
            }
            if execution.is_execution_failure() {
                summary.execution_errors += 1;
            }
        }
        summary
    }

    /// Returns `true` if any result blocks the upgrade.
    pub fn has_blocking(&self) -> bool {
        self.blocking > 0
    }

    /// Returns the process exit code for this run: 1 if anything blocks, else 0.
    pub fn exit_code(&self) -> i32 {
        i32::from(self.has_blocking())
    }
}
