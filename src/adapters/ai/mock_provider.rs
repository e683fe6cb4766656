//! Mock AI Provider for testing and offline runs.
//!
//! Replays scripted replies in order and records every request, so tests can
//! assert on what was sent to the model as well as on what the handler did
//! with the answer.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response(r#"{"impact_score": 6, "summary": "Moderate delay."}"#)
//!     .with_error(AIError::unavailable("maintenance"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, TokenUsage,
};

/// Model name reported on every mock completion.
pub const MOCK_MODEL: &str = "mock-model-1";

/// Reply used once the script runs dry.
pub const MOCK_DEFAULT_CONTENT: &str =
    r#"{"impact_score": 5, "summary": "Mock analysis: moderate impact expected."}"#;

/// Scripted AI provider.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success {
        content: String,
        finish_reason: FinishReason,
    },
    Error(AIError),
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful reply with the given content.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success {
            content: content.into(),
            finish_reason: FinishReason::Stop,
        });
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: AIError) -> Self {
        self.push(MockResponse::Error(error));
        self
    }

    /// Queues a reply that stopped at the output token limit.
    pub fn with_truncated_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success {
            content: content.into(),
            finish_reason: FinishReason::Length,
        });
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }

    fn push(&self, response: MockResponse) {
        lock(&self.responses).push_back(response);
    }

    fn next_response(&self) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: MOCK_DEFAULT_CONTENT.to_string(),
                finish_reason: FinishReason::Stop,
            })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let prompt_chars: usize = request.messages.iter().map(|m| m.content.len()).sum();
        lock(&self.calls).push(request);

        match self.next_response() {
            MockResponse::Success {
                content,
                finish_reason,
            } => {
                // ~4 characters per token
                let usage = TokenUsage::new(
                    (prompt_chars / 4).max(1) as u32,
                    (content.len() / 4).max(1) as u32,
                );
                Ok(CompletionResponse {
                    content,
                    usage,
                    model: MOCK_MODEL.to_string(),
                    finish_reason,
                })
            }
            MockResponse::Error(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MessageRole, RequestMetadata};

    fn test_request() -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new("trace-123"))
            .with_message(MessageRole::User, "Accident on PIE")
    }

    #[tokio::test]
    async fn returns_configured_responses_in_order() {
        let provider = MockAIProvider::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(provider.complete(test_request()).await.unwrap().content, "first");
        assert_eq!(provider.complete(test_request()).await.unwrap().content, "second");
    }

    #[tokio::test]
    async fn falls_back_to_default_when_script_is_exhausted() {
        let provider = MockAIProvider::new();
        let response = provider.complete(test_request()).await.unwrap();
        assert_eq!(response.content, MOCK_DEFAULT_CONTENT);
        assert_eq!(response.model, MOCK_MODEL);
        assert_eq!(response.finish_reason, FinishReason::Stop);
    }

    #[tokio::test]
    async fn truncated_response_reports_length() {
        let provider = MockAIProvider::new().with_truncated_response(r#"{"impact_score": 7, "summ"#);
        let response = provider.complete(test_request()).await.unwrap();
        assert_eq!(response.finish_reason, FinishReason::Length);
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let provider = MockAIProvider::new().with_error(AIError::AuthenticationFailed);
        let result = provider.complete(test_request()).await;
        assert!(matches!(result, Err(AIError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn records_calls() {
        let provider = MockAIProvider::new();
        provider.complete(test_request()).await.unwrap();

        assert_eq!(provider.call_count(), 1);
        let calls = provider.get_calls();
        assert_eq!(calls[0].messages[0].content, "Accident on PIE");
        assert_eq!(calls[0].metadata.trace_id, "trace-123");
    }

    #[tokio::test]
    async fn clones_share_script_and_history() {
        let provider = MockAIProvider::new().with_response("shared");
        let clone = provider.clone();

        assert_eq!(clone.complete(test_request()).await.unwrap().content, "shared");
        assert_eq!(provider.call_count(), 1);
    }
}
