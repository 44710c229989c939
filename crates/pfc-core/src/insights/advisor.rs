//! Advice generation with fixed fallbacks
//!
//! The advisor never surfaces backend errors: whatever goes wrong, the caller
//! gets a displayable string.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::ai::{AIBackend, AIClient};
use crate::error::{Error, Result};
use crate::models::Transaction;
use crate::prompts::{PromptId, PromptLibrary};

use super::payload::{build_insight_payload, InsightRequest};

pub const EMPTY_LEDGER_MESSAGE: &str =
    "Start adding your income and expenses to receive personalized AI insights!";
pub const FALLBACK_MESSAGE: &str =
    "An error occurred while analyzing your finances. Please try again later.";
pub const NO_TEXT_MESSAGE: &str = "Unable to generate insights at this moment.";

#[derive(Debug, Clone, PartialEq)]
pub enum InsightOutcome {
    Ready(String),
    /// Another request from this advisor is still running
    Busy,
}

/// Turns a ledger into advice text through an injected backend
pub struct InsightAdvisor {
    client: AIClient,
    prompts: Mutex<PromptLibrary>,
    currency_symbol: String,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when dropped, including on cancellation
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl InsightAdvisor {
    pub fn new(client: AIClient) -> Self {
        Self {
            client,
            prompts: Mutex::new(PromptLibrary::new()),
            currency_symbol: "৳".to_string(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_prompts(mut self, prompts: PromptLibrary) -> Self {
        self.prompts = Mutex::new(prompts);
        self
    }

    pub fn with_currency_symbol(mut self, symbol: &str) -> Self {
        self.currency_symbol = symbol.to_string();
        self
    }

    pub fn client(&self) -> &AIClient {
        &self.client
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Produce advice text. Never fails.
    ///
    /// An empty ledger returns the "start adding" message without calling
    /// the backend.
    pub async fn generate(&self, transactions: &[Transaction], user_name: &str) -> String {
        let payload = match build_insight_payload(transactions, user_name) {
            InsightRequest::Empty => return EMPTY_LEDGER_MESSAGE.to_string(),
            InsightRequest::Ready(payload) => payload,
        };

        let instructions = match self.instructions(user_name) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Failed to render advice prompt");
                return FALLBACK_MESSAGE.to_string();
            }
        };

        debug!(
            backend = self.client.kind(),
            model = self.client.model(),
            months = payload.monthly_series.len(),
            transactions = transactions.len(),
            "Requesting financial advice"
        );

        match self
            .client
            .generate_advice(&payload.to_json(), &instructions)
            .await
        {
            Ok(text) if text.trim().is_empty() => NO_TEXT_MESSAGE.to_string(),
            Ok(text) => text,
            Err(e) => {
                warn!(
                    backend = self.client.kind(),
                    host = self.client.host(),
                    error = %e,
                    "Advice generation failed"
                );
                FALLBACK_MESSAGE.to_string()
            }
        }
    }

    /// Like [`generate`](Self::generate), but refuses to start a second
    /// request while one is running. Nothing is queued.
    pub async fn try_generate(&self, transactions: &[Transaction], user_name: &str) -> InsightOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Advice request already in flight");
            return InsightOutcome::Busy;
        }
        let _guard = InFlightGuard(&self.in_flight);

        InsightOutcome::Ready(self.generate(transactions, user_name).await)
    }

    fn instructions(&self, user_name: &str) -> Result<String> {
        let mut prompts = self
            .prompts
            .lock()
            .map_err(|_| Error::Prompt("prompt library lock poisoned".into()))?;
        let prompt = prompts.get(PromptId::FinancialAdvice)?;

        let mut vars = HashMap::new();
        vars.insert("user_name", user_name);
        vars.insert("currency_symbol", self.currency_symbol.as_str());
        Ok(prompt.render_system(&vars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MockBackend, MockReply};
    use crate::models::{IncomeSource, NewTransaction};
    use chrono::NaiveDate;

    fn advisor(mock: &MockBackend) -> InsightAdvisor {
        InsightAdvisor::new(AIClient::Mock(mock.clone())).with_prompts(PromptLibrary::embedded_only())
    }

    fn ledger() -> Vec<Transaction> {
        vec![Transaction::from_new(
            "1".into(),
            NewTransaction::income(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                5000.0,
                IncomeSource::Salary,
            ),
        )
        .unwrap()]
    }

    #[tokio::test]
    async fn test_empty_ledger_skips_backend() {
        let mock = MockBackend::new();
        let text = advisor(&mock).generate(&[], "Rahim").await;
        assert_eq!(text, EMPTY_LEDGER_MESSAGE);
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_returns_backend_text_verbatim() {
        let mock = MockBackend::with_reply(MockReply::Text("# Advice\nSave more.".into()));
        let text = advisor(&mock).generate(&ledger(), "Rahim").await;
        assert_eq!(text, "# Advice\nSave more.");
        assert_eq!(mock.calls(), 1);

        let payload = mock.last_payload().unwrap();
        assert_eq!(payload["userName"], "Rahim");
        assert_eq!(payload["monthlySeries"]["2024-01"]["income"], 5000.0);
    }

    #[tokio::test]
    async fn test_failure_becomes_fallback() {
        let mock = MockBackend::failing();
        let text = advisor(&mock).generate(&ledger(), "Rahim").await;
        assert_eq!(text, FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn test_blank_text_becomes_no_text_message() {
        let mock = MockBackend::with_reply(MockReply::Text("  \n".into()));
        assert_eq!(
            advisor(&mock).generate(&ledger(), "Rahim").await,
            NO_TEXT_MESSAGE
        );

        let mock = MockBackend::with_reply(MockReply::Empty);
        assert_eq!(
            advisor(&mock).generate(&ledger(), "Rahim").await,
            NO_TEXT_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_try_generate_is_busy_while_in_flight() {
        let mock = MockBackend::new();
        let advisor = advisor(&mock);

        advisor.in_flight.store(true, Ordering::SeqCst);
        assert_eq!(
            advisor.try_generate(&ledger(), "Rahim").await,
            InsightOutcome::Busy
        );
        assert_eq!(mock.calls(), 0);

        advisor.in_flight.store(false, Ordering::SeqCst);
        let outcome = advisor.try_generate(&ledger(), "Rahim").await;
        assert!(matches!(outcome, InsightOutcome::Ready(_)));
        assert!(!advisor.is_busy());
        assert_eq!(mock.calls(), 1);
    }

    #[test]
    fn test_instructions_render_name_and_symbol() {
        let advisor = advisor(&MockBackend::new()).with_currency_symbol("Tk");
        let text = advisor.instructions("Salma").unwrap();
        assert!(text.contains("Salma"));
        assert!(text.contains("Tk30,000"));
    }
}
