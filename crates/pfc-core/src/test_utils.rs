//! Test utilities for pfc-core
//!
//! Provides a mock LLM server speaking the Gemini, OpenAI-compatible and
//! Ollama wire formats, so the HTTP backends can be exercised end to end.

use axum::{
    extract::{Json, Path},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::sync::oneshot;

/// Mock LLM server for testing and development
///
/// Every generate route answers with a short Markdown advice text that
/// greets the `userName` found in the payload.
pub struct MockLlmServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockLlmServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let app = Router::new()
            // Gemini: GET for model info, POST for "<model>:generateContent"
            .route(
                "/v1beta/models/:model",
                get(handle_gemini_model).post(handle_gemini_generate),
            )
            .route("/v1/models", get(handle_openai_models))
            .route("/v1/chat/completions", post(handle_openai_chat))
            .route("/api/tags", get(handle_ollama_tags))
            .route("/api/generate", post(handle_ollama_generate));

        Self::serve(app).await
    }

    /// Start a server that answers every request with HTTP 500
    pub async fn start_failing() -> Self {
        let app = Router::new().fallback(|| async {
            (StatusCode::INTERNAL_SERVER_ERROR, "model unavailable")
        });
        Self::serve(app).await
    }

    async fn serve(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockLlmServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Canned advice for the payload text a backend sent
pub fn mock_advice(payload_text: &str) -> String {
    let name = serde_json::from_str::<Value>(payload_text)
        .ok()
        .and_then(|v| v.get("userName").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| "there".to_string());
    format!(
        "## Financial Review for {}\n\n- Your savings rate is steady.\n\n\
         **Goal:** reduce grocery spending by 10% next month.",
        name
    )
}

// ========== Gemini ==========

async fn handle_gemini_model(Path(model): Path<String>) -> Json<Value> {
    Json(json!({ "name": format!("models/{}", model) }))
}

async fn handle_gemini_generate(
    Path(model_action): Path<String>,
    Json(request): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !model_action.ends_with(":generateContent") {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "message": "unknown action" } })),
        );
    }
    let text = request["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": mock_advice(text) }] },
                "finishReason": "STOP"
            }]
        })),
    )
}

// ========== OpenAI-compatible ==========

async fn handle_openai_models() -> Json<Value> {
    Json(json!({ "object": "list", "data": [{ "id": "mock-model", "object": "model" }] }))
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

async fn handle_openai_chat(Json(request): Json<ChatRequest>) -> Json<Value> {
    let user_text = request
        .messages
        .iter()
        .rev()
        .find(|m| m.role == "user")
        .map(|m| m.content.as_str())
        .unwrap_or_default();
    Json(json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "model": request.model,
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": mock_advice(user_text) },
            "finish_reason": "stop"
        }]
    }))
}

// ========== Ollama ==========

async fn handle_ollama_tags() -> Json<Value> {
    Json(json!({
        "models": [{ "name": "llama3.2:latest", "modified_at": "2024-01-01T00:00:00Z", "size": 4_000_000_000u64 }]
    }))
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
}

async fn handle_ollama_generate(Json(request): Json<GenerateRequest>) -> Json<Value> {
    Json(json!({
        "model": request.model,
        "response": mock_advice(&request.prompt),
        "done": true
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_advice_uses_name() {
        assert!(mock_advice(r#"{"userName":"Rina"}"#).contains("Rina"));
        assert!(mock_advice("not json").contains("there"));
    }

    #[tokio::test]
    async fn test_mock_server_routes() {
        let server = MockLlmServer::start().await;
        let client = reqwest::Client::new();

        let tags = client
            .get(format!("{}/api/tags", server.url()))
            .send()
            .await
            .unwrap();
        assert!(tags.status().is_success());

        let model = client
            .get(format!("{}/v1beta/models/gemini-test", server.url()))
            .send()
            .await
            .unwrap();
        assert!(model.status().is_success());
    }

    #[tokio::test]
    async fn test_failing_server() {
        let server = MockLlmServer::start_failing().await;
        let resp = reqwest::get(format!("{}/v1/models", server.url()))
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 500);
    }
}
