//! Mock backend for testing
//!
//! Returns canned advice without a running model. Can be switched to return
//! empty text or fail outright, and counts how often it was called.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::AIBackend;

pub const MOCK_ADVICE: &str = "## Monthly Review\n\nYour balance is positive. \
Keep at least ৳5,000 aside each month in a DPS account.\n\n\
**Goal for next month:** reduce grocery spending by 10%.";

/// What the mock answers with
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    Text(String),
    /// The model answered but produced no text
    Empty,
    /// The request fails
    Fail,
}

/// Mock AI backend for testing
///
/// Clones share the call counter and the last payload seen.
#[derive(Clone)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    reply: MockReply,
    calls: Arc<AtomicUsize>,
    last_payload: Arc<Mutex<Option<serde_json::Value>>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a new mock backend (healthy, canned advice)
    pub fn new() -> Self {
        Self::with_reply(MockReply::Text(MOCK_ADVICE.to_string()))
    }

    pub fn with_reply(reply: MockReply) -> Self {
        Self {
            healthy: true,
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
            last_payload: Arc::new(Mutex::new(None)),
        }
    }

    /// A mock whose requests always fail
    pub fn failing() -> Self {
        Self {
            healthy: false,
            ..Self::with_reply(MockReply::Fail)
        }
    }

    /// Number of `generate_advice` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Payload of the most recent call
    pub fn last_payload(&self) -> Option<serde_json::Value> {
        self.last_payload.lock().ok().and_then(|p| p.clone())
    }
}

#[async_trait]
impl AIBackend for MockBackend {
    async fn generate_advice(
        &self,
        payload: &serde_json::Value,
        _instructions: &str,
    ) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_payload.lock() {
            *last = Some(payload.clone());
        }

        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Empty => Ok(String::new()),
            MockReply::Fail => Err(Error::Ai("mock backend configured to fail".into())),
        }
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_counts_calls_and_keeps_payload() {
        let mock = MockBackend::new();
        let shared = mock.clone();

        mock.generate_advice(&json!({"n": 1}), "").await.unwrap();
        mock.generate_advice(&json!({"n": 2}), "").await.unwrap();

        assert_eq!(shared.calls(), 2);
        assert_eq!(shared.last_payload(), Some(json!({"n": 2})));
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let mock = MockBackend::failing();
        assert!(!mock.health_check().await);
        let err = mock.generate_advice(&json!({}), "").await.unwrap_err();
        assert!(matches!(err, Error::Ai(_)));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_reply() {
        let mock = MockBackend::with_reply(MockReply::Empty);
        assert_eq!(mock.generate_advice(&json!({}), "").await.unwrap(), "");
    }
}
