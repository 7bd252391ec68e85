//! Mock Completion Provider for testing.
//!
//! Configurable mock implementation of the `CompletionProvider` port, so
//! tests run without calling a real model API.
//!
//! # Features
//!
//! - Queued replies consumed in call order
//! - Keyed replies matched on the request's instructions (one per persona)
//! - Per-reply delays for completion-order testing
//! - Error injection for resilience testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockCompletionProvider::new()
//!     .with_keyed_reply("Steve Jobs", "Make it insanely great.")
//!     .with_keyed_error("Elon Musk", MockError::Timeout { timeout_secs: 60 });
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    CompletionError, CompletionProvider, CompletionRequest, CompletionResponse, ProviderInfo,
};

/// Mock completion provider for testing.
#[derive(Debug, Clone, Default)]
pub struct MockCompletionProvider {
    /// Queued replies, consumed in order when no keyed reply matches.
    queue: Arc<Mutex<VecDeque<MockReply>>>,
    /// Keyed replies: first entry whose key is contained in the request's
    /// instructions (falling back to its input) wins.
    keyed: Arc<Mutex<Vec<(String, MockReply)>>>,
    /// When set, every call fails with this error.
    fail_all: Option<MockError>,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock reply.
#[derive(Debug, Clone)]
pub struct MockReply {
    outcome: Result<String, MockError>,
    delay: Duration,
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate rate limiting.
    RateLimited { retry_after_secs: u32 },
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate a network error.
    Network { message: String },
    /// Simulate a timeout.
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for CompletionError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => {
                CompletionError::rate_limited(retry_after_secs)
            }
            MockError::Unavailable { message } => CompletionError::unavailable(message),
            MockError::AuthenticationFailed => CompletionError::AuthenticationFailed,
            MockError::Network { message } => CompletionError::network(message),
            MockError::Timeout { timeout_secs } => CompletionError::Timeout { timeout_secs },
        }
    }
}

impl MockCompletionProvider {
    /// Creates a new mock provider with no configured replies.
    ///
    /// With nothing configured, every call succeeds with a canned output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.queue.lock().unwrap().push_back(MockReply {
            outcome: Ok(content.into()),
            delay: Duration::ZERO,
        });
        self
    }

    /// Queues an error reply.
    pub fn with_error(self, error: MockError) -> Self {
        self.queue.lock().unwrap().push_back(MockReply {
            outcome: Err(error),
            delay: Duration::ZERO,
        });
        self
    }

    /// Registers a successful reply for requests whose instructions contain
    /// `key`.
    pub fn with_keyed_reply(self, key: impl Into<String>, content: impl Into<String>) -> Self {
        self.keyed.lock().unwrap().push((
            key.into(),
            MockReply {
                outcome: Ok(content.into()),
                delay: Duration::ZERO,
            },
        ));
        self
    }

    /// Registers a delayed successful reply for requests whose instructions
    /// contain `key`.
    pub fn with_keyed_reply_delayed(
        self,
        key: impl Into<String>,
        content: impl Into<String>,
        delay: Duration,
    ) -> Self {
        self.keyed.lock().unwrap().push((
            key.into(),
            MockReply {
                outcome: Ok(content.into()),
                delay,
            },
        ));
        self
    }

    /// Registers an error reply for requests whose instructions contain `key`.
    pub fn with_keyed_error(self, key: impl Into<String>, error: MockError) -> Self {
        self.keyed.lock().unwrap().push((
            key.into(),
            MockReply {
                outcome: Err(error),
                delay: Duration::ZERO,
            },
        ));
        self
    }

    /// Makes every call fail with the given error.
    pub fn failing_with(mut self, error: MockError) -> Self {
        self.fail_all = Some(error);
        self
    }

    /// Returns all requests this provider has received.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn reply_for(&self, request: &CompletionRequest) -> MockReply {
        if let Some(ref err) = self.fail_all {
            return MockReply {
                outcome: Err(err.clone()),
                delay: Duration::ZERO,
            };
        }

        let haystack = request
            .instructions
            .as_deref()
            .unwrap_or(request.input.as_str());
        if let Some((_, reply)) = self
            .keyed
            .lock()
            .unwrap()
            .iter()
            .find(|(key, _)| haystack.contains(key.as_str()))
        {
            return reply.clone();
        }

        self.queue.lock().unwrap().pop_front().unwrap_or(MockReply {
            outcome: Ok("mock output".to_string()),
            delay: Duration::ZERO,
        })
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.calls.lock().unwrap().push(request.clone());

        let reply = self.reply_for(&request);
        if !reply.delay.is_zero() {
            sleep(reply.delay).await;
        }

        match reply.outcome {
            Ok(content) => Ok(CompletionResponse {
                output_text: content,
                model: "mock-model-1".to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "mock-model-1")
    }
}
