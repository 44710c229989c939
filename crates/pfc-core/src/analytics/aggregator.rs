//! Totals, monthly series and category breakdowns

use std::collections::BTreeMap;

use crate::models::{
    CategoryBreakdown, FinancialStats, MonthKey, MonthlyStat, Transaction, TransactionKind,
};

/// Sum income and expense over all transactions
pub fn summarize(transactions: &[Transaction]) -> FinancialStats {
    let (total_income, total_expense) =
        transactions
            .iter()
            .fold((0.0, 0.0), |(income, expense), tx| match tx.kind {
                TransactionKind::Income { .. } => (income + tx.amount, expense),
                TransactionKind::Expense { .. } => (income, expense + tx.amount),
            });

    FinancialStats {
        total_income,
        total_expense,
        balance: total_income - total_expense,
    }
}

/// Group transactions by calendar month and total each group.
///
/// Rebuilt from scratch on every call.
pub fn monthly_series(transactions: &[Transaction]) -> BTreeMap<MonthKey, MonthlyStat> {
    let mut series: BTreeMap<MonthKey, MonthlyStat> = BTreeMap::new();

    for tx in transactions {
        let stat = series.entry(tx.month()).or_default();
        match tx.kind {
            TransactionKind::Income { .. } => stat.income += tx.amount,
            TransactionKind::Expense { .. } => stat.expense += tx.amount,
        }
    }

    for stat in series.values_mut() {
        stat.balance = stat.income - stat.expense;
    }

    series
}

/// Sum amounts per income source (income) and per category (expenses)
pub fn category_breakdown(transactions: &[Transaction]) -> CategoryBreakdown {
    let mut breakdown = CategoryBreakdown::new();

    for tx in transactions {
        *breakdown
            .entry(tx.transaction_type())
            .or_default()
            .entry(tx.kind.classification_key().to_string())
            .or_insert(0.0) += tx.amount;
    }

    breakdown
}

/// Expense totals per sub-item label. Expenses without a sub-item are not counted.
pub fn item_breakdown(transactions: &[Transaction]) -> BTreeMap<String, f64> {
    let mut items = BTreeMap::new();

    for tx in transactions {
        if let Some(item) = tx.sub_category() {
            *items.entry(item.to_string()).or_insert(0.0) += tx.amount;
        }
    }

    items
}
