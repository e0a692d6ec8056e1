//! Cooperative cancellation for long running evaluations.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use crate::EvaluationError;

/// A cloneable flag checked at generation and episode boundaries.
///
/// Clones share the same flag, so cancelling one cancels all of them. A token
/// may also carry a deadline after which it reports itself as cancelled.
///
/// ```
/// use trashbot_evaluator::cancel::CancelToken;
///
/// let token = CancelToken::new();
/// let worker = token.clone();
/// assert!(!worker.is_cancelled());
///
/// token.cancel();
/// assert!(worker.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a token that cancels itself once `deadline` has passed.
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            flag: Arc::default(),
            deadline: Some(deadline),
        }
    }

    /// Creates a token that cancels itself `limit` from now.
    #[must_use]
    pub fn with_time_limit(limit: Duration) -> Self {
        Self::with_deadline(Instant::now() + limit)
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed) || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Returns [`EvaluationError::Cancelled`] if the token has been cancelled.
    pub fn check(&self) -> Result<(), EvaluationError> {
        if self.is_cancelled() {
            return Err(EvaluationError::Cancelled);
        }
        Ok(())
    }
}
