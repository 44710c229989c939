//! OpenAI-compatible backend implementation
//!
//! Works with any server that implements the OpenAI chat completions API:
//! - vLLM (http://localhost:8000)
//! - LocalAI (http://localhost:8080)
//! - llama-server / llama.cpp (http://localhost:8080)
//! - hosted OpenAI-style APIs
//!
//! # Configuration
//!
//! Environment variables:
//! - `OPENAI_COMPATIBLE_HOST`: Server URL (required)
//! - `OPENAI_COMPATIBLE_MODEL`: Model name (default: gpt-3.5-turbo)
//! - `OPENAI_COMPATIBLE_API_KEY`: API key if required (optional)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

use super::{payload_text, AIBackend, AiOptions};

/// OpenAI-compatible backend
///
/// Sends the instructions as the system message and the payload as the
/// user message to `/v1/chat/completions`.
#[derive(Clone)]
pub struct OpenAICompatibleBackend {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
}

impl OpenAICompatibleBackend {
    /// Create a new OpenAI-compatible backend
    pub fn new(base_url: &str, model: &str, options: AiOptions) -> Self {
        Self {
            http_client: options.http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: None,
            temperature: options.temperature,
        }
    }

    /// Attach an API key sent as a bearer token
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Create from environment variables
    ///
    /// Required: `OPENAI_COMPATIBLE_HOST`
    pub fn from_env(options: AiOptions) -> Option<Self> {
        let host = std::env::var("OPENAI_COMPATIBLE_HOST").ok()?;
        let model = std::env::var("OPENAI_COMPATIBLE_MODEL")
            .unwrap_or_else(|_| "gpt-3.5-turbo".to_string());

        let backend = Self::new(&host, &model, options);
        match std::env::var("OPENAI_COMPATIBLE_API_KEY") {
            Ok(key) if !key.is_empty() => Some(backend.with_api_key(&key)),
            _ => Some(backend),
        }
    }
}

/// OpenAI chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[async_trait]
impl AIBackend for OpenAICompatibleBackend {
    async fn generate_advice(
        &self,
        payload: &serde_json::Value,
        instructions: &str,
    ) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(instructions.to_string()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(payload_text(payload)),
                },
            ],
            temperature: Some(self.temperature),
            stream: false,
        };

        let mut req_builder = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&request);

        if let Some(ref api_key) = self.api_key {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req_builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Ai(format!("OpenAI API error {}: {}", status, body)));
        }

        let chat_response: ChatCompletionResponse = response.json().await?;
        debug!(model = %self.model, "OpenAI-compatible response received");

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or_else(|| Error::Ai("No choices in OpenAI API response".into()))
    }

    async fn health_check(&self) -> bool {
        // Try /v1/models first (standard OpenAI endpoint)
        if let Ok(resp) = self
            .http_client
            .get(format!("{}/v1/models", self.base_url))
            .send()
            .await
        {
            if resp.status().is_success() {
                return true;
            }
        }

        // Try /health (common for LocalAI and llama-server)
        if let Ok(resp) = self
            .http_client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
        {
            if resp.status().is_success() {
                return true;
            }
        }

        false
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockLlmServer;
    use serde_json::json;

    #[test]
    fn test_backend_new_trims_trailing_slash() {
        let backend =
            OpenAICompatibleBackend::new("http://localhost:8000/", "llama3.2", AiOptions::default());
        assert_eq!(backend.host(), "http://localhost:8000");
        assert_eq!(backend.model(), "llama3.2");
    }

    #[test]
    fn test_backend_with_api_key() {
        let backend =
            OpenAICompatibleBackend::new("http://localhost:8000", "gpt-4", AiOptions::default())
                .with_api_key("sk-test123");
        assert_eq!(backend.api_key, Some("sk-test123".to_string()));
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatCompletionRequest {
            model: "llama3.2".to_string(),
            messages: vec![ChatMessage {
                role: "system".to_string(),
                content: Some("advise".to_string()),
            }],
            temperature: None,
            stream: false,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "advise");
        assert!(json.get("temperature").is_none());
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_response_with_null_content() {
        let raw = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":null}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert!(response.choices[0].message.content.is_none());
    }

    #[tokio::test]
    async fn test_generate_against_mock_server() {
        let server = MockLlmServer::start().await;
        let backend = OpenAICompatibleBackend::new(&server.url(), "llama3.2", AiOptions::default());

        assert!(backend.health_check().await);
        let text = backend
            .generate_advice(&json!({"userName": "Nadia"}), "Advise the user.")
            .await
            .unwrap();
        assert!(text.contains("Nadia"));
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let server = MockLlmServer::start_failing().await;
        let backend = OpenAICompatibleBackend::new(&server.url(), "llama3.2", AiOptions::default());

        assert!(!backend.health_check().await);
        let err = backend.generate_advice(&json!({}), "x").await.unwrap_err();
        assert!(matches!(err, Error::Ai(_)));
    }
}
