//! Google Gemini backend
//!
//! Calls the REST `generateContent` endpoint. The instructions go in as the
//! system instruction and the payload as the single user turn.
//!
//! # Configuration
//!
//! Environment variables:
//! - `GEMINI_API_KEY` or `API_KEY`: API key (required)
//! - `GEMINI_MODEL`: Model name (default: gemini-3-flash-preview)
//! - `GEMINI_BASE_URL`: API root (default: https://generativelanguage.googleapis.com)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

use super::{payload_text, AIBackend, AiOptions};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Gemini REST backend
#[derive(Clone)]
pub struct GeminiBackend {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f32,
}

impl GeminiBackend {
    pub fn new(base_url: &str, model: &str, api_key: &str, options: AiOptions) -> Self {
        Self {
            http_client: options.http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            temperature: options.temperature,
        }
    }

    /// Create from environment variables
    ///
    /// Required: `GEMINI_API_KEY` (falls back to `API_KEY`)
    pub fn from_env(options: AiOptions) -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty())?;
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Some(Self::new(&base_url, &model, &api_key, options))
    }

    fn model_url(&self) -> String {
        format!("{}/v1beta/models/{}", self.base_url, self.model)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    thinking_config: ThinkingConfig,
}

/// Advice is plain prose, so no thinking budget is spent
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, joined
    fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl AIBackend for GeminiBackend {
    async fn generate_advice(
        &self,
        payload: &serde_json::Value,
        instructions: &str,
    ) -> Result<String> {
        let request = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: Some(instructions.to_string()),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(payload_text(payload)),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };

        let response = self
            .http_client
            .post(format!("{}:generateContent", self.model_url()))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Ai(format!("Gemini API error {}: {}", status, body)));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed.text();
        debug!(model = %self.model, chars = text.len(), "Gemini response received");
        Ok(text)
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(self.model_url())
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}
