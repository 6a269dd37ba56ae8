/*!
 * Explicit per-call deadlines for networked attempts.
 */

use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, timeout_at};

use crate::errors::ProviderError;

/// Absolute point in time a single call must finish by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    /// Deadline `budget` from now
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
            budget,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// The earlier of two deadlines; a caller's limit caps a strategy's own budget
    pub fn earliest(self, other: Deadline) -> Deadline {
        if other.at < self.at { other } else { self }
    }

    /// Await `call`, cancelling it when the deadline passes
    pub async fn run<T, F>(self, call: F) -> Result<T, ProviderError>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        match timeout_at(self.at, call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.budget)),
        }
    }
}
