//! Report command implementations

use anyhow::Result;
use pfc_core::db::Database;
use pfc_core::models::TransactionType;
use pfc_core::storage::load_ledger;
use pfc_core::{category_breakdown, item_breakdown, monthly_series, summarize, AppConfig};

use super::truncate;

pub fn cmd_dashboard(db: &Database, config: &AppConfig, name: &str) -> Result<()> {
    let ledger = load_ledger(db);
    let stats = summarize(ledger.transactions());

    println!();
    println!("📊 Hello, {}", name);
    println!("   ─────────────────────────────────────────");
    println!("   Total income:   \x1b[32m{:>16}\x1b[0m", config.money(stats.total_income));
    println!("   Total expense:  \x1b[31m{:>16}\x1b[0m", config.money(stats.total_expense));
    println!("   Balance:        {:>16}", config.money(stats.balance));
    println!();
    println!("   {} transactions recorded", ledger.len());

    if ledger.is_empty() {
        println!();
        println!("💡 Start adding your income and expenses:");
        println!("   pfc add income --amount 50000 --source salary");
    }

    Ok(())
}

pub fn cmd_report_monthly(db: &Database, config: &AppConfig) -> Result<()> {
    let ledger = load_ledger(db);
    let series = monthly_series(ledger.transactions());

    if series.is_empty() {
        println!("No transactions yet.");
        return Ok(());
    }

    println!();
    println!("📅 Monthly Summary");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:<8} │ {:>16} │ {:>16} │ {:>16}",
        "Month", "Income", "Expense", "Balance"
    );

    for (month, stat) in &series {
        let balance = if stat.balance < 0.0 {
            format!("\x1b[31m{:>16}\x1b[0m", config.money(stat.balance))
        } else {
            format!("{:>16}", config.money(stat.balance))
        };
        println!(
            "   {:<8} │ {:>16} │ {:>16} │ {}",
            month.to_string(),
            config.money(stat.income),
            config.money(stat.expense),
            balance
        );
    }

    Ok(())
}

pub fn cmd_report_breakdown(db: &Database, config: &AppConfig) -> Result<()> {
    let ledger = load_ledger(db);
    let breakdown = category_breakdown(ledger.transactions());

    if breakdown.is_empty() {
        println!("No transactions yet.");
        return Ok(());
    }

    for (tx_type, title) in [
        (TransactionType::Income, "💰 Income by Source"),
        (TransactionType::Expense, "💸 Expenses by Category"),
    ] {
        let Some(totals) = breakdown.get(&tx_type) else {
            continue;
        };
        let total: f64 = totals.values().sum();

        let mut rows: Vec<(&String, &f64)> = totals.iter().collect();
        rows.sort_by(|a, b| b.1.total_cmp(a.1));

        println!();
        println!("{} ({})", title, config.money(total));
        println!("   ─────────────────────────────────────────────────────");
        for (key, amount) in rows {
            let share = if total > 0.0 { amount / total * 100.0 } else { 0.0 };
            println!(
                "   {:<26} {:>16} {:>6.1}%",
                truncate(key, 26),
                config.money(*amount),
                share
            );
        }
    }

    Ok(())
}

pub fn cmd_report_items(db: &Database, config: &AppConfig) -> Result<()> {
    let ledger = load_ledger(db);
    let items = item_breakdown(ledger.transactions());

    if items.is_empty() {
        println!("No expenses with items yet.");
        return Ok(());
    }

    let mut rows: Vec<(&String, &f64)> = items.iter().collect();
    rows.sort_by(|a, b| b.1.total_cmp(a.1));

    println!();
    println!("🧾 Spending by Item");
    println!("   ─────────────────────────────────────────────");
    for (item, amount) in rows {
        println!("   {:<28} {:>16}", truncate(item, 28), config.money(*amount));
    }

    Ok(())
}
