//! Thread-safe accumulator for check executions produced by worker threads.

use crate::executor::CheckExecution;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// A thread-safe accumulator for [`CheckExecution`]s.
///
/// Multiple workers push concurrently via [`push`](Self::push). Failing and
/// blocking counts are tracked atomically so progress can be read without
/// locking the execution vector.
#[derive(Debug, Default)]
pub struct ExecutionSink {
    executions: Mutex<Vec<CheckExecution>>,
    failing: AtomicUsize,
    blocking: AtomicUsize,
}

impl ExecutionSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an execution.
    pub fn push(&self, execution: CheckExecution) {
        if execution.result.is_failing() {
            self.failing.fetch_add(1, Ordering::Relaxed);
        }
        if execution.result.is_blocking() {
            self.blocking.fetch_add(1, Ordering::Relaxed);
        }
        self.executions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(execution);
    }

    /// Returns the number of executions whose result is failing.
    pub fn failing_count(&self) -> usize {
        self.failing.load(Ordering::Relaxed)
    }

    /// Returns the number of executions whose result blocks the upgrade.
    pub fn blocking_count(&self) -> usize {
        self.blocking.load(Ordering::Relaxed)
    }

    /// Returns the number of executions held.
    pub fn len(&self) -> usize {
        self.executions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no executions are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takes all executions, leaving the sink empty. Counters are not reset.
    pub fn take_all(&self) -> Vec<CheckExecution> {
        let mut executions = self
            .executions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *executions)
    }

    /// Returns a copy of the executions without draining.
    pub fn snapshot(&self) -> Vec<CheckExecution> {
        self.executions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
