//! Deterministic in-process backend for tests and offline smoke runs.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{GenerationRequest, GeneratorError, TextGenerator};

/// Returns a canned reply for every request and counts invocations.
///
/// `fail_when_prompt_contains` scripts a failure for specific sections: any
/// request whose prompt contains the needle returns
/// `GeneratorError::Backend` with the configured detail instead of a reply.
pub struct MockGenerator {
    reply: String,
    fail_when_prompt_contains: Option<String>,
    fail_detail: String,
    calls: AtomicUsize,
}

impl MockGenerator {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            fail_when_prompt_contains: None,
            fail_detail: "mock failure".into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail any request whose prompt contains `needle`, with `detail` as the
    /// error text.
    pub fn failing_on(mut self, needle: impl Into<String>, detail: impl Into<String>) -> Self {
        self.fail_when_prompt_contains = Some(needle.into());
        self.fail_detail = detail.into();
        self
    }

    /// Number of `generate` calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(ref needle) = self.fail_when_prompt_contains {
            if request.prompt.contains(needle.as_str()) {
                return Err(GeneratorError::Backend(self.fail_detail.clone()));
            }
        }

        Ok(self.reply.clone())
    }
}
