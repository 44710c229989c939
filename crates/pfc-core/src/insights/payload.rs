//! Data handed to the advice backend

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analytics::{category_breakdown, monthly_series};
use crate::models::{CategoryBreakdown, MonthlyStat, Transaction};

/// Aggregates the advisor reasons about
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightPayload {
    pub user_name: String,
    /// Keyed by `YYYY-MM`, so key order is chronological
    pub monthly_series: BTreeMap<String, MonthlyStat>,
    pub category_breakdown: CategoryBreakdown,
}

impl InsightPayload {
    pub fn to_json(&self) -> serde_json::Value {
        // Only strings and finite numbers are involved; Null is unreachable.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InsightRequest {
    /// Nothing recorded yet; answer with the canned prompt to start
    Empty,
    Ready(InsightPayload),
}

/// Derive the advice payload from the current ledger
pub fn build_insight_payload(transactions: &[Transaction], user_name: &str) -> InsightRequest {
    if transactions.is_empty() {
        return InsightRequest::Empty;
    }

    let monthly_series = monthly_series(transactions)
        .into_iter()
        .map(|(month, stat)| (month.to_string(), stat))
        .collect();

    InsightRequest::Ready(InsightPayload {
        user_name: user_name.to_string(),
        monthly_series,
        category_breakdown: category_breakdown(transactions),
    })
}
