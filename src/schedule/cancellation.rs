//! Cooperative cancellation for long-running aggregation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::{EngineError, EngineResult};

/// A cancel flag shared between a caller and a running operation, with an
/// optional deadline.
///
/// Clones share the flag. The operation polls [`CancellationToken::check`]
/// between units of work.
///
/// # Example
///
/// ```
/// use roster_engine::schedule::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// assert!(token.check("report").is_ok());
///
/// handle.cancel();
/// assert!(token.check("report").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancellationToken {
    /// A token that is only cancelled explicitly.
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that also expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns true once cancelled or past the deadline.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Fails with `Cancelled` once the token is cancelled.
    pub fn check(&self, operation: &str) -> EngineResult<()> {
        if self.is_cancelled() {
            Err(EngineError::Cancelled {
                operation: operation.to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_token_is_not_cancelled() {
        assert!(!CancellationToken::new().is_cancelled());
    }

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_zero_timeout_expires_immediately() {
        let token = CancellationToken::with_timeout(Duration::ZERO);
        match token.check("monthly_report") {
            Err(EngineError::Cancelled { operation }) => assert_eq!(operation, "monthly_report"),
            other => panic!("Expected Cancelled, got {other:?}"),
        }
    }

    #[test]
    fn test_long_timeout_not_expired() {
        let token = CancellationToken::with_timeout(Duration::from_secs(3600));
        assert!(token.check("monthly_report").is_ok());
    }
}
