//! Transaction command implementations

use anyhow::{anyhow, Context, Result};
use pfc_core::catalog::{canonical_item, default_item};
use pfc_core::db::Database;
use pfc_core::models::{
    ExpenseCategory, IncomeSource, NewTransaction, Transaction, TrendDirection, TrendResult,
};
use pfc_core::storage::{load_ledger, save_ledger};
use pfc_core::{AppConfig, PriceIndex};
use tracing::debug;

use super::{parse_date_arg, truncate};

pub fn cmd_add_income(
    db: &Database,
    config: &AppConfig,
    amount: f64,
    source: &str,
    date: Option<&str>,
    note: Option<&str>,
) -> Result<Transaction> {
    let source: IncomeSource = source.parse().map_err(|e: String| {
        anyhow!("{} (valid: salary, freelancing, business, investments, rental, others)", e)
    })?;
    let date = parse_date_arg(date)?;

    let new = NewTransaction::income(date, amount, source).with_note(note.unwrap_or_default());
    let tx = record(db, new)?;

    println!(
        "✅ Income recorded: {} from {} on {}",
        config.money(tx.amount),
        source,
        tx.date
    );
    println!("   id: {}", short_id(&tx.id));
    Ok(tx)
}

pub fn cmd_add_expense(
    db: &Database,
    config: &AppConfig,
    amount: f64,
    category: &str,
    item: Option<&str>,
    date: Option<&str>,
    note: Option<&str>,
) -> Result<Transaction> {
    let category: ExpenseCategory = category
        .parse()
        .map_err(|e: String| anyhow!("{} (see: pfc categories)", e))?;
    let date = parse_date_arg(date)?;

    let item = match item.map(str::trim).filter(|i| !i.is_empty()) {
        Some(item) => Some(canonical_item(category, item)),
        None => default_item(category).map(str::to_string),
    };

    let new = NewTransaction::expense(date, amount, category, item.as_deref())
        .with_note(note.unwrap_or_default());
    let tx = record(db, new)?;

    println!(
        "✅ Expense recorded: {} for {} on {}",
        config.money(tx.amount),
        tx.display_label(),
        tx.date
    );
    println!("   id: {}", short_id(&tx.id));

    let ledger = load_ledger(db);
    if let Some(badge) = trend_badge(
        PriceIndex::build(ledger.transactions()).trend(&tx),
        config,
    ) {
        println!("   vs last month: {}", badge);
    }
    Ok(tx)
}

/// Validate, append and persist
fn record(db: &Database, new: NewTransaction) -> Result<Transaction> {
    let ledger = load_ledger(db);
    let (ledger, tx) = ledger.add(new).context("Invalid transaction")?;
    save_ledger(db, &ledger).context("Failed to save ledger")?;
    debug!(id = %tx.id, count = ledger.len(), "Transaction added");
    Ok(tx)
}

pub fn cmd_delete(db: &Database, config: &AppConfig, id: &str) -> Result<()> {
    let ledger = load_ledger(db);
    let target = ledger.resolve_id(id)?.id.clone();

    let (ledger, removed) = ledger.remove(&target);
    let Some(removed) = removed else {
        println!("Transaction {} not found.", id);
        return Ok(());
    };
    save_ledger(db, &ledger).context("Failed to save ledger")?;

    println!(
        "🗑️  Deleted {} {} ({}) from {}",
        removed.transaction_type().as_str().to_lowercase(),
        config.money(removed.amount),
        removed.display_label(),
        removed.date
    );
    Ok(())
}

pub fn cmd_ledger(db: &Database, config: &AppConfig, limit: usize) -> Result<()> {
    let ledger = load_ledger(db);

    if ledger.is_empty() {
        println!("No transactions yet. Add one with:");
        println!("  pfc add expense --amount 150 --category \"Monthly Groceries\" --item Rice");
        return Ok(());
    }

    let index = PriceIndex::build(ledger.transactions());

    println!();
    println!("📝 Ledger ({} total)", ledger.len());
    println!("   ─────────────────────────────────────────────────────────────────────");

    for tx in ledger.by_date_desc().into_iter().take(limit) {
        let amount_str = if tx.is_expense() {
            format!("\x1b[31m-{}\x1b[0m", config.money(tx.amount)) // Red for expenses
        } else {
            format!("\x1b[32m+{}\x1b[0m", config.money(tx.amount)) // Green for income
        };

        let label = match tx.sub_category() {
            Some(item) => format!("{} · {}", item, tx.kind.classification_key()),
            None => tx.kind.classification_key().to_string(),
        };

        let badge = trend_badge(index.trend(tx), config).unwrap_or_default();

        println!(
            "   {} │ {} │ {:>14} │ {:<36} {}",
            short_id(&tx.id),
            tx.date,
            amount_str,
            truncate(&label, 36),
            badge
        );
        if !tx.note.is_empty() {
            println!("   {:>8}   {}", "", truncate(&tx.note, 60));
        }
    }

    if ledger.len() > limit {
        println!();
        println!("   ... {} more (use --limit)", ledger.len() - limit);
    }

    Ok(())
}

/// Badge for a trend comparison. Equal prices show "=" with no arrow; no
/// comparison shows nothing.
pub fn trend_badge(trend: Option<TrendResult>, config: &AppConfig) -> Option<String> {
    match trend? {
        TrendResult::NoPriorData => None,
        TrendResult::Compared {
            direction,
            magnitude,
            ..
        } => {
            let Some(arrow) = direction.arrow() else {
                return Some("=".to_string());
            };
            // Paying more is bad news
            let color = if direction == TrendDirection::Higher { 31 } else { 32 };
            Some(format!(
                "\x1b[{}m{} {}\x1b[0m",
                color,
                arrow,
                config.money(magnitude)
            ))
        }
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
