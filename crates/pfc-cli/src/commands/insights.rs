//! AI insight commands

use anyhow::{bail, Result};
use pfc_core::db::Database;
use pfc_core::models::Transaction;
use pfc_core::storage::load_ledger;
use pfc_core::{AIBackend, AIClient, AppConfig, InsightAdvisor, InsightOutcome};

/// Build the AI client from environment variables, with request options from config
pub fn ai_client_from_env(config: &AppConfig) -> Result<AIClient> {
    match AIClient::from_env_with(config.ai_options()) {
        Some(client) => Ok(client),
        None => bail!(
            "No AI backend configured.\n\
             💡 Tip: Set GEMINI_API_KEY for Gemini (the default)\n\
             💡 Tip: Or set AI_BACKEND=ollama with OLLAMA_HOST, or\n\
             \x20       AI_BACKEND=openai_compatible with OPENAI_COMPATIBLE_HOST"
        ),
    }
}

pub async fn cmd_insights(
    db: &Database,
    config: &AppConfig,
    client: AIClient,
    name: &str,
) -> Result<String> {
    let ledger = load_ledger(db);

    println!(
        "🤖 Asking {} ({}) for advice on {} transactions...",
        client.kind(),
        client.model(),
        ledger.len()
    );

    let advisor = InsightAdvisor::new(client).with_currency_symbol(&config.display.currency_symbol);
    run_advisor(&advisor, ledger.transactions(), name).await
}

/// Ask the advisor once and print the result
pub async fn run_advisor(
    advisor: &InsightAdvisor,
    transactions: &[Transaction],
    name: &str,
) -> Result<String> {
    let text = match advisor.try_generate(transactions, name).await {
        InsightOutcome::Ready(text) => text,
        InsightOutcome::Busy => bail!("An advice request is already running, try again shortly"),
    };

    println!();
    println!("{}", text);
    Ok(text)
}

pub async fn cmd_ai_test(client: &AIClient) -> Result<()> {
    println!("🔌 Testing AI backend...");
    println!("   Backend: {}", client.kind());
    println!("   Host:    {}", client.host());
    println!("   Model:   {}", client.model());

    if client.health_check().await {
        println!("✅ Backend is reachable");
        Ok(())
    } else {
        bail!("Backend at {} is not reachable", client.host())
    }
}
