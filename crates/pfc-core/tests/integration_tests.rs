//! Integration tests for pfc-core
//!
//! These tests exercise the full add → persist → reload → analyze → advise flow.

use chrono::NaiveDate;
use pfc_core::{
    ai::{AiOptions, OllamaBackend, OpenAICompatibleBackend},
    db::Database,
    insights::{EMPTY_LEDGER_MESSAGE, FALLBACK_MESSAGE},
    models::{ExpenseCategory, IncomeSource, NewTransaction, TrendDirection, TrendResult},
    storage::{load_ledger, load_user_name, reset_profile, save_ledger, save_user_name},
    test_utils::MockLlmServer,
    AIClient, InsightAdvisor, Ledger, MockBackend, PriceIndex, PromptLibrary,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Two months of household entries
fn household_ledger() -> Ledger {
    let entries = vec![
        NewTransaction::income(date(2024, 1, 1), 50_000.0, IncomeSource::Salary),
        NewTransaction::expense(date(2024, 1, 3), 15_000.0, ExpenseCategory::Rent, Some("House Rent")),
        NewTransaction::expense(date(2024, 1, 10), 100.0, ExpenseCategory::MonthlyGroceries, Some("Rice")),
        NewTransaction::expense(date(2024, 1, 20), 120.0, ExpenseCategory::MonthlyGroceries, Some("Rice")),
        NewTransaction::income(date(2024, 2, 1), 50_000.0, IncomeSource::Salary),
        NewTransaction::income(date(2024, 2, 12), 8_000.0, IncomeSource::Freelancing),
        NewTransaction::expense(date(2024, 2, 3), 15_000.0, ExpenseCategory::Rent, Some("House Rent")),
        NewTransaction::expense(date(2024, 2, 9), 150.0, ExpenseCategory::MonthlyGroceries, Some("Rice")),
        NewTransaction::expense(date(2024, 2, 15), 300.0, ExpenseCategory::Transport, Some("CNG")),
    ];

    entries.into_iter().fold(Ledger::new(), |ledger, new| {
        ledger.add(new).expect("valid entry").0
    })
}

fn advisor(client: AIClient) -> InsightAdvisor {
    InsightAdvisor::new(client).with_prompts(PromptLibrary::embedded_only())
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_ledger_survives_database_round_trip() {
    let db = Database::in_memory().expect("Failed to create database");
    let ledger = household_ledger();

    save_user_name(&db, "Rahim").unwrap();
    save_ledger(&db, &ledger).unwrap();

    assert_eq!(load_user_name(&db).as_deref(), Some("Rahim"));
    let reloaded = load_ledger(&db);
    assert_eq!(reloaded, ledger);
    assert_eq!(
        pfc_core::summarize(reloaded.transactions()),
        pfc_core::summarize(ledger.transactions())
    );
}

#[test]
fn test_delete_persists() {
    let db = Database::in_memory().unwrap();
    let ledger = household_ledger();
    let victim = ledger.transactions()[0].id.clone();

    let (ledger, removed) = ledger.remove(&victim);
    assert!(removed.is_some());
    save_ledger(&db, &ledger).unwrap();

    let reloaded = load_ledger(&db);
    assert!(reloaded.get(&victim).is_none());
    assert_eq!(reloaded.len(), 8);
}

#[test]
fn test_reset_profile_empties_database() {
    let db = Database::in_memory().unwrap();
    save_user_name(&db, "Rahim").unwrap();
    save_ledger(&db, &household_ledger()).unwrap();

    reset_profile(&db).unwrap();

    assert_eq!(load_user_name(&db), None);
    assert!(load_ledger(&db).is_empty());
}

// =============================================================================
// Analytics over a realistic ledger
// =============================================================================

#[test]
fn test_dashboard_and_monthly_totals() {
    let ledger = household_ledger();
    let stats = pfc_core::summarize(ledger.transactions());
    assert_eq!(stats.total_income, 108_000.0);
    assert_eq!(stats.total_expense, 30_670.0);
    assert_eq!(stats.balance, 77_330.0);

    let series = pfc_core::monthly_series(ledger.transactions());
    let months: Vec<String> = series.keys().map(|k| k.to_string()).collect();
    assert_eq!(months, vec!["2024-01", "2024-02"]);
    assert_eq!(series.values().next().unwrap().balance, 34_780.0);
}

#[test]
fn test_rice_trend_and_index_agree() {
    let ledger = household_ledger();
    let txs = ledger.transactions();
    let index = PriceIndex::build(txs);

    let feb_rice = txs
        .iter()
        .find(|t| t.sub_category() == Some("Rice") && t.date == date(2024, 2, 9))
        .unwrap();

    // January average is 110, February paid 150
    match pfc_core::price_trend(feb_rice, txs) {
        Some(TrendResult::Compared {
            direction,
            magnitude,
            previous_average,
        }) => {
            assert_eq!(direction, TrendDirection::Higher);
            assert!((previous_average - 110.0).abs() < 1e-9);
            assert!((magnitude - 40.0).abs() < 1e-9);
        }
        other => panic!("unexpected trend {:?}", other),
    }

    for tx in txs {
        assert_eq!(index.trend(tx), pfc_core::price_trend(tx, txs));
    }
}

// =============================================================================
// Insights
// =============================================================================

#[tokio::test]
async fn test_insights_with_mock_backend() {
    let mock = MockBackend::new();
    let advisor = advisor(AIClient::Mock(mock.clone()));
    let ledger = household_ledger();

    let text = advisor.generate(ledger.transactions(), "Rahim").await;
    assert!(text.contains("Monthly Review"));
    assert_eq!(mock.calls(), 1);

    let payload = mock.last_payload().unwrap();
    assert_eq!(payload["categoryBreakdown"]["INCOME"]["Freelancing"], 8_000.0);
    assert_eq!(payload["monthlySeries"]["2024-02"]["expense"], 15_450.0);
}

#[tokio::test]
async fn test_empty_ledger_never_calls_backend() {
    let mock = MockBackend::new();
    let advisor = advisor(AIClient::Mock(mock.clone()));

    assert_eq!(advisor.generate(&[], "Rahim").await, EMPTY_LEDGER_MESSAGE);
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn test_insights_over_http_backends() {
    let server = MockLlmServer::start().await;
    let ledger = household_ledger();

    let openai = AIClient::OpenAICompatible(OpenAICompatibleBackend::new(
        &server.url(),
        "mock-model",
        AiOptions::default(),
    ));
    let text = advisor(openai).generate(ledger.transactions(), "Rahim").await;
    assert!(text.contains("Financial Review for Rahim"));

    let ollama = AIClient::Ollama(OllamaBackend::new(
        &server.url(),
        "llama3.2",
        AiOptions::default(),
    ));
    let text = advisor(ollama).generate(ledger.transactions(), "Salma").await;
    assert!(text.contains("Financial Review for Salma"));
}

#[tokio::test]
async fn test_server_failure_yields_fallback() {
    let server = MockLlmServer::start_failing().await;
    let client = AIClient::OpenAICompatible(OpenAICompatibleBackend::new(
        &server.url(),
        "mock-model",
        AiOptions::default(),
    ));

    let text = advisor(client)
        .generate(household_ledger().transactions(), "Rahim")
        .await;
    assert_eq!(text, FALLBACK_MESSAGE);
}
