//! Domain models for PFC

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lowercase a label and drop everything but letters and digits, so that
/// "Laundry & Ironing", "laundry-ironing" and "LAUNDRY_IRONING" compare equal.
fn normalize_key(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Direction of money flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {} (valid: income, expense)", s)),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where income comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IncomeSource {
    Salary,
    Freelancing,
    Business,
    Investments,
    Rental,
    Others,
}

impl IncomeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Freelancing => "Freelancing",
            Self::Business => "Business",
            Self::Investments => "Investments",
            Self::Rental => "Rental",
            Self::Others => "Others",
        }
    }

    pub fn all() -> &'static [IncomeSource] {
        &[
            Self::Salary,
            Self::Freelancing,
            Self::Business,
            Self::Investments,
            Self::Rental,
            Self::Others,
        ]
    }
}

impl std::str::FromStr for IncomeSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = normalize_key(s);
        Self::all()
            .iter()
            .copied()
            .find(|source| normalize_key(source.as_str()) == key)
            .ok_or_else(|| format!("Unknown income source: {}", s))
    }
}

impl fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Expense categories
///
/// The two grocery categories were originally labelled with the name of the
/// household member doing the shopping; those labels are still accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[serde(rename = "Monthly Groceries", alias = "Monthly Groceries (Shohid)")]
    MonthlyGroceries,
    #[serde(rename = "Daily Groceries", alias = "Daily Groceries (Imran)")]
    DailyGroceries,
    #[serde(rename = "Laundry & Ironing")]
    LaundryIroning,
    Rent,
    Utilities,
    Transport,
    Healthcare,
    Education,
    Entertainment,
    Others,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MonthlyGroceries => "Monthly Groceries",
            Self::DailyGroceries => "Daily Groceries",
            Self::LaundryIroning => "Laundry & Ironing",
            Self::Rent => "Rent",
            Self::Utilities => "Utilities",
            Self::Transport => "Transport",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Entertainment => "Entertainment",
            Self::Others => "Others",
        }
    }

    pub fn all() -> &'static [ExpenseCategory] {
        &[
            Self::MonthlyGroceries,
            Self::DailyGroceries,
            Self::LaundryIroning,
            Self::Rent,
            Self::Utilities,
            Self::Transport,
            Self::Healthcare,
            Self::Education,
            Self::Entertainment,
            Self::Others,
        ]
    }
}

impl std::str::FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = normalize_key(s);
        match key.as_str() {
            "monthlygroceriesshohid" => return Ok(Self::MonthlyGroceries),
            "dailygroceriesimran" => return Ok(Self::DailyGroceries),
            "laundry" => return Ok(Self::LaundryIroning),
            _ => {}
        }
        Self::all()
            .iter()
            .copied()
            .find(|category| normalize_key(category.as_str()) == key)
            .ok_or_else(|| format!("Unknown expense category: {}", s))
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification of a transaction.
///
/// Income carries its source; expenses carry a category and an optional
/// sub-item label. One variant holds at a time, so a transaction can never
/// have both an income source and a category.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionKind {
    Income {
        source: IncomeSource,
    },
    Expense {
        category: ExpenseCategory,
        sub_category: Option<String>,
    },
}

impl TransactionKind {
    pub fn income(source: IncomeSource) -> Self {
        Self::Income { source }
    }

    /// Build an expense kind; a blank sub-item label is treated as absent
    pub fn expense(category: ExpenseCategory, sub_category: Option<&str>) -> Self {
        let sub_category = sub_category
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self::Expense {
            category,
            sub_category,
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Income { .. } => TransactionType::Income,
            Self::Expense { .. } => TransactionType::Expense,
        }
    }

    /// Income source for income, category for expenses
    pub fn classification_key(&self) -> &'static str {
        match self {
            Self::Income { source } => source.as_str(),
            Self::Expense { category, .. } => category.as_str(),
        }
    }

    pub fn sub_category(&self) -> Option<&str> {
        match self {
            Self::Income { .. } => None,
            Self::Expense { sub_category, .. } => sub_category.as_deref(),
        }
    }
}

/// Reject amounts that are NaN, infinite or negative
pub fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() {
        return Err(Error::Validation(format!(
            "amount must be a finite number, got {}",
            amount
        )));
    }
    if amount < 0.0 {
        return Err(Error::Validation(format!(
            "amount must not be negative, got {}",
            amount
        )));
    }
    Ok(())
}

/// Parse a stored date. Accepts `YYYY-MM-DD` or a full ISO timestamp
/// (`T` or space after the date), of which only the date part is kept.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    let date_part = match s.as_bytes().get(10) {
        Some(b'T') | Some(b' ') => &s[..10],
        _ => s,
    };
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| Error::Validation(format!("invalid date '{}': {}", s, e)))
}

/// A ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord", into = "TransactionRecord")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub note: String,
    pub kind: TransactionKind,
}

impl Transaction {
    /// Attach an identifier to a validated candidate
    pub fn from_new(id: String, new: NewTransaction) -> Result<Self> {
        new.validate()?;
        Ok(Self {
            id,
            date: new.date,
            amount: new.amount,
            note: new.note,
            kind: new.kind,
        })
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.kind.transaction_type()
    }

    pub fn is_income(&self) -> bool {
        matches!(self.kind, TransactionKind::Income { .. })
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.kind, TransactionKind::Expense { .. })
    }

    pub fn sub_category(&self) -> Option<&str> {
        self.kind.sub_category()
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    /// Label shown in the ledger: sub-item if present, else category or source
    pub fn display_label(&self) -> &str {
        self.sub_category()
            .unwrap_or_else(|| self.kind.classification_key())
    }
}

/// A transaction candidate (before an id is assigned)
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub note: String,
    pub kind: TransactionKind,
}

impl NewTransaction {
    pub fn income(date: NaiveDate, amount: f64, source: IncomeSource) -> Self {
        Self {
            date,
            amount,
            note: String::new(),
            kind: TransactionKind::income(source),
        }
    }

    pub fn expense(
        date: NaiveDate,
        amount: f64,
        category: ExpenseCategory,
        sub_category: Option<&str>,
    ) -> Self {
        Self {
            date,
            amount,
            note: String::new(),
            kind: TransactionKind::expense(category, sub_category),
        }
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.note = note.trim().to_string();
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)
    }
}

/// Persisted shape of a transaction.
///
/// Flat record with optional classification fields, validated on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub date: String,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ExpenseCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_source: Option<IncomeSource>,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = Error;

    fn try_from(record: TransactionRecord) -> Result<Self> {
        if record.id.trim().is_empty() {
            return Err(Error::Validation("record has an empty id".into()));
        }
        validate_amount(record.amount)?;
        let date = parse_date(&record.date)?;

        let kind = match record.transaction_type {
            TransactionType::Income => {
                if record.category.is_some() || record.sub_category.is_some() {
                    return Err(Error::Validation(format!(
                        "income record {} carries an expense category",
                        record.id
                    )));
                }
                let source = record.income_source.ok_or_else(|| {
                    Error::Validation(format!("income record {} has no source", record.id))
                })?;
                TransactionKind::income(source)
            }
            TransactionType::Expense => {
                if record.income_source.is_some() {
                    return Err(Error::Validation(format!(
                        "expense record {} carries an income source",
                        record.id
                    )));
                }
                let category = record.category.ok_or_else(|| {
                    Error::Validation(format!("expense record {} has no category", record.id))
                })?;
                TransactionKind::expense(category, record.sub_category.as_deref())
            }
        };

        Ok(Transaction {
            id: record.id,
            date,
            amount: record.amount,
            note: record.note,
            kind,
        })
    }
}

impl From<Transaction> for TransactionRecord {
    fn from(tx: Transaction) -> Self {
        let transaction_type = tx.transaction_type();
        let (category, sub_category, income_source) = match tx.kind {
            TransactionKind::Income { source } => (None, None, Some(source)),
            TransactionKind::Expense {
                category,
                sub_category,
            } => (Some(category), sub_category, None),
        };
        Self {
            id: tx.id,
            transaction_type,
            amount: tx.amount,
            date: tx.date.format("%Y-%m-%d").to_string(),
            note: tx.note,
            category,
            sub_category,
            income_source,
        }
    }
}

// ========== Analytics Models ==========

/// Dashboard totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStats {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}

/// A calendar month. Orders by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based month
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month immediately before this one (January rolls back to December)
    pub fn previous(&self) -> Self {
        if self.month <= 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Income/expense/balance for one month
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStat {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// Summed amounts per classification key, split by transaction type
pub type CategoryBreakdown = BTreeMap<TransactionType, BTreeMap<String, f64>>;

/// How an entry's amount compares to last month's average for the same item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Higher,
    Lower,
    /// Same as the average; shown without an arrow
    Equal,
}

impl TrendDirection {
    pub fn arrow(&self) -> Option<&'static str> {
        match self {
            Self::Higher => Some("↑"),
            Self::Lower => Some("↓"),
            Self::Equal => None,
        }
    }
}

/// Result of a price trend comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrendResult {
    /// Nothing bought under the same label last month
    NoPriorData,
    Compared {
        direction: TrendDirection,
        /// |amount - previous_average|
        magnitude: f64,
        previous_average: f64,
    },
}

impl TrendResult {
    pub fn direction(&self) -> Option<TrendDirection> {
        match self {
            Self::NoPriorData => None,
            Self::Compared { direction, .. } => Some(*direction),
        }
    }
}
