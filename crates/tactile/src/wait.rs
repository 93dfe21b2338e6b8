//! Bounded polling waits
//!
//! Pages that build their DOM from script need a moment before their
//! elements can be located. [`Wait::until`] polls an async predicate at a
//! fixed interval until it holds or the deadline passes.

use crate::result::{InteractionError, InteractionResult};
use crate::session::{By, Session};
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::debug;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default element-availability timeout (15 seconds)
pub const DEFAULT_ELEMENT_TIMEOUT_MS: u64 = 15_000;

/// Default polling interval (500ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

// =============================================================================
// WAIT RESULT
// =============================================================================

/// Result of a successful wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitResult {
    /// Time spent waiting
    pub elapsed: Duration,
    /// Number of times the predicate was evaluated
    pub attempts: u32,
}

// =============================================================================
// WAIT
// =============================================================================

/// Polling wait with a deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wait {
    timeout: Duration,
    poll_interval: Duration,
}

impl Default for Wait {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_ELEMENT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl Wait {
    /// Wait with the given timeout and the default poll interval
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    /// Set polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Get timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get polling interval
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Poll `condition` until it returns `true`.
    ///
    /// The predicate runs at least once, even with a zero timeout. Sleeps
    /// never overshoot the deadline.
    pub async fn until<F, Fut>(
        &self,
        waited_for: &str,
        mut condition: F,
    ) -> InteractionResult<WaitResult>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = bool>,
    {
        let start = Instant::now();
        let mut attempts = 0;

        loop {
            attempts += 1;
            if condition().await {
                debug!(waited_for, attempts, "wait condition met");
                return Ok(WaitResult {
                    elapsed: start.elapsed(),
                    attempts,
                });
            }

            let elapsed = start.elapsed();
            if elapsed >= self.timeout {
                return Err(InteractionError::Timeout {
                    ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                    waited_for: waited_for.to_string(),
                });
            }
            tokio::time::sleep(self.poll_interval.min(self.timeout - elapsed)).await;
        }
    }
}

/// Whether an element with `id` can currently be located.
///
/// Any lookup error counts as "not available".
pub async fn is_element_available<S: Session + ?Sized>(session: &S, id: &str) -> bool {
    session.find_element(&By::id(id)).await.is_ok()
}
