//! PFC Core Library
//!
//! Shared functionality for the PFC personal finance companion:
//! - Transaction model with a type-enforced income/expense split
//! - Copy-on-write ledger
//! - Analytics: totals, monthly series, category breakdowns, price trends
//! - AI insights with pluggable backends (Gemini, OpenAI-compatible, Ollama)
//! - Prompt library for customizable advisor instructions
//! - Encrypted SQLite key-value persistence

pub mod ai;
pub mod analytics;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod insights;
pub mod ledger;
pub mod models;
pub mod prompts;
pub mod storage;

/// Test utilities including a mock LLM server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{
    AIBackend, AIClient, AiOptions, GeminiBackend, MockBackend, MockReply, OllamaBackend,
    OpenAICompatibleBackend,
};
pub use analytics::{
    category_breakdown, item_breakdown, monthly_series, price_trend, summarize, PriceIndex,
};
pub use config::AppConfig;
pub use db::Database;
pub use error::{Error, Result};
pub use insights::{
    build_insight_payload, InsightAdvisor, InsightOutcome, InsightPayload, InsightRequest,
};
pub use ledger::Ledger;
pub use models::*;
pub use prompts::{Prompt, PromptId, PromptInfo, PromptLibrary};
pub use storage::{KeyValueStore, MemoryStore};
