//! Run-scoped cancellation and deadline propagation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cooperative cancellation token wrapping a shared `AtomicBool`.
///
/// Clones share state: cancelling any clone cancels them all.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// The ambient context passed to every check.
///
/// The executor consults [`is_done`](RunContext::is_done) before starting
/// each check; checks may consult it between expensive reads. Nothing
/// interrupts a check that is already running.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RunContext {
    /// Creates a context with no deadline and a fresh token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an externally owned token (e.g. one cancelled by a signal handler).
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Sets an absolute deadline.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets a deadline relative to now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Returns the cancellation token.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Returns the deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Requests cancellation of the run.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns `true` if the run was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Returns `true` if the deadline has passed.
    pub fn deadline_exceeded(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Returns `true` if no new work should start.
    pub fn is_done(&self) -> bool {
        self.is_cancelled() || self.deadline_exceeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_context_is_not_done() {
        let ctx = RunContext::new();
        assert!(!ctx.is_done());
        assert!(ctx.deadline().is_none());
    }

    #[test]
    fn cancel_is_shared_between_clones() {
        let ctx = RunContext::new();
        let clone = ctx.clone();
        clone.cancel();
        assert!(ctx.is_cancelled());
        assert!(ctx.is_done());
    }

    #[test]
    fn external_token() {
        let token = CancellationToken::new();
        let ctx = RunContext::new().with_token(token.clone());
        assert!(!ctx.is_done());
        token.cancel();
        assert!(ctx.is_done());
    }

    #[test]
    fn past_deadline_is_done() {
        let ctx = RunContext::new().with_deadline(Instant::now());
        assert!(ctx.deadline_exceeded());
        assert!(ctx.is_done());
        assert!(!ctx.is_cancelled());
    }

    #[test]
    fn future_deadline_is_not_done() {
        let ctx = RunContext::new().with_timeout(Duration::from_secs(3600));
        assert!(!ctx.is_done());
    }
}
