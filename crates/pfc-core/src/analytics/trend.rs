//! Month-over-month price trend for expense sub-items
//!
//! An expense with a sub-item (e.g. "Rice") is compared with the average
//! amount paid for the same sub-item during the previous calendar month.

use std::collections::HashMap;

use crate::models::{MonthKey, Transaction, TrendDirection, TrendResult};

/// Compare `target` with last month's average for its sub-item.
///
/// Returns `None` when no badge applies (income, or an expense without a
/// sub-item). Scans the whole collection, so rendering a table this way is
/// quadratic; use [`PriceIndex`] for large ledgers.
pub fn price_trend(target: &Transaction, all: &[Transaction]) -> Option<TrendResult> {
    if !target.is_expense() {
        return None;
    }
    let item = target.sub_category()?;
    let previous = target.month().previous();

    let mut amounts: Vec<f64> = all
        .iter()
        .filter(|t| t.id != target.id)
        .filter(|t| t.is_expense() && t.sub_category() == Some(item))
        .filter(|t| previous.contains(t.date))
        .map(|t| t.amount)
        .collect();
    amounts.sort_by(f64::total_cmp);

    match mean(&amounts) {
        Some(avg) => Some(compare(target.amount, avg)),
        None => Some(TrendResult::NoPriorData),
    }
}

/// Mean of amounts in ascending order. Summing in a fixed order keeps the
/// scan and the index bit-for-bit identical regardless of ledger order.
fn mean(sorted: &[f64]) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    Some(sorted.iter().sum::<f64>() / sorted.len() as f64)
}

fn compare(amount: f64, previous_average: f64) -> TrendResult {
    let direction = if amount > previous_average {
        TrendDirection::Higher
    } else if amount < previous_average {
        TrendDirection::Lower
    } else {
        TrendDirection::Equal
    };
    TrendResult::Compared {
        direction,
        magnitude: (amount - previous_average).abs(),
        previous_average,
    }
}

/// Amounts paid per (sub-item, month), for fast trend lookups.
///
/// Gives the same answers as [`price_trend`]. Can be built once per ledger
/// snapshot or kept current with `insert`/`remove`.
#[derive(Debug, Clone, Default)]
pub struct PriceIndex {
    /// Each bucket is kept sorted ascending
    buckets: HashMap<(String, MonthKey), Vec<f64>>,
}

impl PriceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(transactions: &[Transaction]) -> Self {
        let mut index = Self::new();
        for tx in transactions {
            index.insert(tx);
        }
        index
    }

    pub fn insert(&mut self, tx: &Transaction) {
        if let Some(key) = Self::key(tx) {
            let bucket = self.buckets.entry(key).or_default();
            let pos = bucket.partition_point(|a| a.total_cmp(&tx.amount).is_lt());
            bucket.insert(pos, tx.amount);
        }
    }

    pub fn remove(&mut self, tx: &Transaction) {
        let Some(key) = Self::key(tx) else {
            return;
        };
        if let Some(bucket) = self.buckets.get_mut(&key) {
            if let Some(pos) = bucket.iter().position(|a| a.total_cmp(&tx.amount).is_eq()) {
                bucket.remove(pos);
            }
            if bucket.is_empty() {
                self.buckets.remove(&key);
            }
        }
    }

    /// Average amount paid for `item` during `month`
    pub fn average(&self, item: &str, month: MonthKey) -> Option<f64> {
        self.buckets
            .get(&(item.to_string(), month))
            .and_then(|amounts| mean(amounts))
    }

    pub fn trend(&self, target: &Transaction) -> Option<TrendResult> {
        if !target.is_expense() {
            return None;
        }
        let item = target.sub_category()?;
        // The target sits in its own month, never the previous one, so it
        // cannot contribute to the average it is compared with.
        match self.average(item, target.month().previous()) {
            Some(avg) => Some(compare(target.amount, avg)),
            None => Some(TrendResult::NoPriorData),
        }
    }

    fn key(tx: &Transaction) -> Option<(String, MonthKey)> {
        if !tx.is_expense() {
            return None;
        }
        tx.sub_category().map(|item| (item.to_string(), tx.month()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, IncomeSource, NewTransaction};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn grocery(id: &str, day: NaiveDate, amount: f64, item: &str) -> Transaction {
        Transaction::from_new(
            id.to_string(),
            NewTransaction::expense(day, amount, ExpenseCategory::MonthlyGroceries, Some(item)),
        )
        .unwrap()
    }

    fn assert_compared(result: Option<TrendResult>, dir: TrendDirection, mag: f64) {
        match result {
            Some(TrendResult::Compared {
                direction,
                magnitude,
                ..
            }) => {
                assert_eq!(direction, dir);
                assert!((magnitude - mag).abs() < 1e-9, "magnitude {}", magnitude);
            }
            other => panic!("expected comparison, got {:?}", other),
        }
    }

    #[test]
    fn test_rice_price_went_up() {
        let txs = vec![
            grocery("jan", date(2024, 1, 15), 100.0, "Rice"),
            grocery("feb", date(2024, 2, 15), 150.0, "Rice"),
        ];
        assert_compared(price_trend(&txs[1], &txs), TrendDirection::Higher, 50.0);
    }

    #[test]
    fn test_first_entry_has_no_prior_data() {
        let txs = vec![
            grocery("jan", date(2024, 1, 15), 100.0, "Rice"),
            grocery("feb", date(2024, 2, 15), 150.0, "Rice"),
        ];
        assert_eq!(
            price_trend(&txs[0], &txs),
            Some(TrendResult::NoPriorData)
        );
    }

    #[test]
    fn test_antisymmetry_around_average() {
        let txs = vec![
            grocery("jan", date(2024, 1, 15), 100.0, "Rice"),
            grocery("up", date(2024, 2, 15), 150.0, "Rice"),
            grocery("down", date(2024, 2, 16), 50.0, "Rice"),
        ];
        assert_compared(price_trend(&txs[1], &txs), TrendDirection::Higher, 50.0);
        assert_compared(price_trend(&txs[2], &txs), TrendDirection::Lower, 50.0);
    }

    #[test]
    fn test_equal_is_neutral() {
        let txs = vec![
            grocery("a", date(2024, 1, 2), 80.0, "Eggs"),
            grocery("b", date(2024, 1, 20), 120.0, "Eggs"),
            grocery("c", date(2024, 2, 1), 100.0, "Eggs"),
        ];
        let result = price_trend(&txs[2], &txs).unwrap();
        assert_eq!(result.direction(), Some(TrendDirection::Equal));
        assert_eq!(TrendDirection::Equal.arrow(), None);
    }

    #[test]
    fn test_january_compares_with_previous_december() {
        let txs = vec![
            grocery("dec", date(2023, 12, 28), 200.0, "Soybean Oil"),
            grocery("jan", date(2024, 1, 3), 180.0, "Soybean Oil"),
        ];
        assert_compared(price_trend(&txs[1], &txs), TrendDirection::Lower, 20.0);
    }

    #[test]
    fn test_only_immediately_preceding_month_counts() {
        let txs = vec![
            grocery("nov", date(2023, 11, 10), 10.0, "Rice"),
            grocery("jan", date(2024, 1, 10), 100.0, "Rice"),
        ];
        assert_eq!(
            price_trend(&txs[1], &txs),
            Some(TrendResult::NoPriorData)
        );
    }

    #[test]
    fn test_other_items_and_same_month_ignored() {
        let txs = vec![
            grocery("a", date(2024, 1, 10), 999.0, "Sugar"),
            grocery("b", date(2024, 2, 1), 70.0, "Rice"),
            grocery("c", date(2024, 2, 10), 100.0, "Rice"),
        ];
        assert_eq!(
            price_trend(&txs[2], &txs),
            Some(TrendResult::NoPriorData)
        );
    }

    #[test]
    fn test_no_badge_for_income_or_unlabelled_expense() {
        let income = Transaction::from_new(
            "i".into(),
            NewTransaction::income(date(2024, 2, 1), 10.0, IncomeSource::Salary),
        )
        .unwrap();
        let plain = Transaction::from_new(
            "p".into(),
            NewTransaction::expense(date(2024, 2, 1), 10.0, ExpenseCategory::Rent, None),
        )
        .unwrap();
        let all = vec![income.clone(), plain.clone()];
        assert_eq!(price_trend(&income, &all), None);
        assert_eq!(price_trend(&plain, &all), None);
    }

    #[test]
    fn test_average_of_several_entries() {
        let txs = vec![
            grocery("a", date(2024, 3, 1), 100.0, "Milk"),
            grocery("b", date(2024, 3, 15), 140.0, "Milk"),
            grocery("c", date(2024, 4, 2), 110.0, "Milk"),
        ];
        match price_trend(&txs[2], &txs) {
            Some(TrendResult::Compared {
                direction,
                magnitude,
                previous_average,
            }) => {
                assert_eq!(direction, TrendDirection::Lower);
                assert!((previous_average - 120.0).abs() < 1e-9);
                assert!((magnitude - 10.0).abs() < 1e-9);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_index_agrees_with_scan() {
        let txs = vec![
            grocery("a", date(2023, 12, 5), 90.0, "Rice"),
            grocery("b", date(2024, 1, 5), 100.0, "Rice"),
            grocery("c", date(2024, 1, 25), 120.0, "Rice"),
            grocery("d", date(2024, 2, 5), 110.0, "Rice"),
            grocery("e", date(2024, 2, 9), 60.0, "Eggs"),
            grocery("f", date(2024, 3, 9), 60.0, "Eggs"),
            Transaction::from_new(
                "g".into(),
                NewTransaction::income(date(2024, 2, 1), 10.0, IncomeSource::Salary),
            )
            .unwrap(),
        ];
        let index = PriceIndex::build(&txs);
        for tx in &txs {
            assert_eq!(index.trend(tx), price_trend(tx, &txs), "row {}", tx.id);
        }
    }

    #[test]
    fn test_index_remove() {
        let jan = grocery("jan", date(2024, 1, 15), 100.0, "Rice");
        let feb = grocery("feb", date(2024, 2, 15), 150.0, "Rice");
        let mut index = PriceIndex::build(&[jan.clone(), feb.clone()]);
        assert_eq!(index.average("Rice", MonthKey::new(2024, 1)), Some(100.0));

        index.remove(&jan);
        assert_eq!(index.average("Rice", MonthKey::new(2024, 1)), None);
        assert_eq!(index.trend(&feb), Some(TrendResult::NoPriorData));
    }

    #[test]
    fn test_index_stays_exact_after_remove() {
        let cheap = grocery("jan-1", date(2024, 1, 5), 0.1, "Rice");
        let dear = grocery("jan-2", date(2024, 1, 20), 0.2, "Rice");
        let feb = grocery("feb", date(2024, 2, 9), 0.2, "Rice");

        let mut index = PriceIndex::build(&[cheap.clone(), dear.clone(), feb.clone()]);
        index.remove(&cheap);

        let remaining = vec![dear, feb.clone()];
        assert_eq!(index.trend(&feb), price_trend(&feb, &remaining));
        assert_compared(index.trend(&feb), TrendDirection::Equal, 0.0);
    }

    #[test]
    fn test_index_agrees_regardless_of_insert_order() {
        let txs = vec![
            grocery("a", date(2024, 1, 3), 0.1, "Eggs"),
            grocery("b", date(2024, 1, 9), 0.7, "Eggs"),
            grocery("c", date(2024, 1, 21), 0.2, "Eggs"),
            grocery("d", date(2024, 2, 2), 1.0 / 3.0, "Eggs"),
        ];

        let mut index = PriceIndex::new();
        for tx in txs.iter().rev() {
            index.insert(tx);
        }
        index.remove(&txs[1]);
        index.insert(&txs[1]);

        for tx in &txs {
            assert_eq!(index.trend(tx), price_trend(tx, &txs), "row {}", tx.id);
        }
    }
}
