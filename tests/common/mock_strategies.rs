/*!
 * Mock strategy implementations for testing
 *
 * Each mock counts its calls so tests can assert which strategies were
 * reached and how many chunks they saw, without any network access.
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use romanize::errors::{AttemptError, ProviderError};
use romanize::transliteration::{Deadline, LanguageContext, RomanizationStrategy};

/// What a mock does with each chunk
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the same text for every chunk
    Fixed(String),
    /// Return `f(chunk)`
    Map(fn(&str) -> String),
    /// Return the chunk unchanged
    Echo,
    /// Fail every call with a connection error
    Fail,
    /// Report the strategy as not applicable
    Unavailable,
    /// Succeed for the first `n` calls with `Map`, then fail
    FailAfter(usize, fn(&str) -> String),
    /// Take longer than any deadline
    Stall,
}

/// Shared view of a mock's activity
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    count: Arc<AtomicUsize>,
    chunks: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn chunks(&self) -> Vec<String> {
        self.chunks.lock().unwrap().clone()
    }

    fn record(&self, chunk: &str) -> usize {
        self.chunks.lock().unwrap().push(chunk.to_string());
        self.count.fetch_add(1, Ordering::SeqCst)
    }
}

/// Configurable strategy double
#[derive(Debug)]
pub struct MockStrategy {
    name: &'static str,
    behavior: MockBehavior,
    enabled: bool,
    timeout: Duration,
    log: CallLog,
}

impl MockStrategy {
    pub fn new(name: &'static str, behavior: MockBehavior) -> Self {
        Self {
            name,
            behavior,
            enabled: true,
            timeout: Duration::from_millis(200),
            log: CallLog::default(),
        }
    }

    /// Mock that is statically disabled
    pub fn disabled(name: &'static str) -> Self {
        Self {
            enabled: false,
            ..Self::new(name, MockBehavior::Fixed("never".to_string()))
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Handle for asserting on calls after the mock is boxed
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    pub fn boxed(self) -> Box<dyn RomanizationStrategy> {
        Box::new(self)
    }
}

#[async_trait]
impl RomanizationStrategy for MockStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn attempt(
        &self,
        chunk: &str,
        _context: &LanguageContext,
        deadline: Deadline,
    ) -> Result<String, AttemptError> {
        let previous_calls = self.log.record(chunk);

        match &self.behavior {
            MockBehavior::Fixed(text) => Ok(text.clone()),
            MockBehavior::Map(f) => Ok(f(chunk)),
            MockBehavior::Echo => Ok(chunk.to_string()),
            MockBehavior::Fail => Err(ProviderError::ConnectionError("mock connection refused".into()).into()),
            MockBehavior::Unavailable => Err(AttemptError::unavailable("mock not applicable")),
            MockBehavior::FailAfter(n, f) => {
                if previous_calls < *n {
                    Ok(f(chunk))
                } else {
                    Err(ProviderError::ApiError { status_code: 500, message: "mock failure".into() }.into())
                }
            }
            MockBehavior::Stall => {
                let output = deadline
                    .run(async {
                        tokio::time::sleep(Duration::from_secs(3600)).await;
                        Ok::<_, ProviderError>(chunk.to_string())
                    })
                    .await?;
                Ok(output)
            }
        }
    }
}

/// Replace every non-ASCII char with 'x'
pub fn ascii_fold(chunk: &str) -> String {
    chunk.chars().map(|c| if c.is_ascii() { c } else { 'x' }).collect()
}
