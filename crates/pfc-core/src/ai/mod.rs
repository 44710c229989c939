//! Pluggable advice-generation backends
//!
//! The insight advisor hands a JSON payload plus rendered instructions to a
//! backend and gets free-form Markdown back. Which backend is used is decided
//! at runtime, and the client is always injected into its consumers.
//!
//! # Architecture
//!
//! - `AIBackend` trait: the interface every backend implements
//! - `AIClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backends: `GeminiBackend`, `OpenAICompatibleBackend`, `OllamaBackend`, `MockBackend`
//!
//! # Usage
//!
//! ```rust,ignore
//! let ai = AIClient::from_env().expect("no backend configured");
//! let text = ai.generate_advice(&payload, &instructions).await?;
//! ```
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: gemini, openai_compatible, ollama or mock. Default: gemini
//! - `GEMINI_API_KEY` (or `API_KEY`): required for gemini
//! - `GEMINI_MODEL`: default gemini-3-flash-preview
//! - `GEMINI_BASE_URL`: default https://generativelanguage.googleapis.com
//! - `OPENAI_COMPATIBLE_HOST`, `OPENAI_COMPATIBLE_MODEL`, `OPENAI_COMPATIBLE_API_KEY`
//! - `OLLAMA_HOST`, `OLLAMA_MODEL`

mod gemini;
mod mock;
mod ollama;
mod openai_compatible;

pub use gemini::GeminiBackend;
pub use mock::{MockBackend, MockReply};
pub use ollama::OllamaBackend;
pub use openai_compatible::OpenAICompatibleBackend;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;

/// Trait defining the interface for all advice backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait AIBackend: Send + Sync {
    /// Generate advice text for `payload`, following `instructions`.
    ///
    /// Returns whatever text the model produced, possibly empty.
    async fn generate_advice(
        &self,
        payload: &serde_json::Value,
        instructions: &str,
    ) -> Result<String>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Request tuning shared by the HTTP backends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiOptions {
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for AiOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            timeout: Duration::from_secs(60),
        }
    }
}

impl AiOptions {
    pub(crate) fn http_client(&self) -> Client {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to build HTTP client, using defaults");
                Client::new()
            })
    }
}

/// The payload as the text the model reads
pub(crate) fn payload_text(payload: &serde_json::Value) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AIClient {
    /// Google Gemini REST API
    Gemini(GeminiBackend),
    /// OpenAI-compatible chat completions (vLLM, LocalAI, llama-server, etc.)
    OpenAICompatible(OpenAICompatibleBackend),
    /// Ollama HTTP API
    Ollama(OllamaBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Create an AI client from environment variables with default options
    pub fn from_env() -> Option<Self> {
        Self::from_env_with(AiOptions::default())
    }

    /// Create an AI client from environment variables
    ///
    /// Checks `AI_BACKEND` to determine which backend to use. Returns None
    /// if the variables the chosen backend needs are not set.
    pub fn from_env_with(options: AiOptions) -> Option<Self> {
        let backend = std::env::var("AI_BACKEND").unwrap_or_else(|_| "gemini".to_string());

        match backend.to_lowercase().as_str() {
            "gemini" | "google" => GeminiBackend::from_env(options).map(AIClient::Gemini),
            "openai_compatible" | "openai" | "vllm" | "localai" | "llamacpp" => {
                OpenAICompatibleBackend::from_env(options).map(AIClient::OpenAICompatible)
            }
            "ollama" => OllamaBackend::from_env(options).map(AIClient::Ollama),
            "mock" => Some(AIClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown AI_BACKEND, falling back to gemini");
                GeminiBackend::from_env(options).map(AIClient::Gemini)
            }
        }
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }

    /// Short backend name for status output
    pub fn kind(&self) -> &'static str {
        match self {
            AIClient::Gemini(_) => "gemini",
            AIClient::OpenAICompatible(_) => "openai_compatible",
            AIClient::Ollama(_) => "ollama",
            AIClient::Mock(_) => "mock",
        }
    }
}

// Implement AIBackend for AIClient by delegating to the inner backend
#[async_trait]
impl AIBackend for AIClient {
    async fn generate_advice(
        &self,
        payload: &serde_json::Value,
        instructions: &str,
    ) -> Result<String> {
        match self {
            AIClient::Gemini(b) => b.generate_advice(payload, instructions).await,
            AIClient::OpenAICompatible(b) => b.generate_advice(payload, instructions).await,
            AIClient::Ollama(b) => b.generate_advice(payload, instructions).await,
            AIClient::Mock(b) => b.generate_advice(payload, instructions).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::Gemini(b) => b.health_check().await,
            AIClient::OpenAICompatible(b) => b.health_check().await,
            AIClient::Ollama(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::Gemini(b) => b.model(),
            AIClient::OpenAICompatible(b) => b.model(),
            AIClient::Ollama(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::Gemini(b) => b.host(),
            AIClient::OpenAICompatible(b) => b.host(),
            AIClient::Ollama(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_client_mock() {
        let client = AIClient::mock();
        assert_eq!(client.model(), "mock");
        assert_eq!(client.host(), "mock://localhost");
        assert_eq!(client.kind(), "mock");
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let client = AIClient::mock();
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_mock_generate_advice() {
        let client = AIClient::mock();
        let text = client
            .generate_advice(&serde_json::json!({"userName": "Rahim"}), "Be brief.")
            .await
            .unwrap();
        assert!(!text.is_empty());
    }

    #[test]
    fn test_default_options() {
        let options = AiOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(60));
        assert!((options.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_payload_text_is_pretty_json() {
        let text = payload_text(&serde_json::json!({"a": 1}));
        assert!(text.contains("\"a\": 1"));
    }
}
