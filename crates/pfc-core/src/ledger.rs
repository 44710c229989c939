//! The ledger: the full collection of transactions
//!
//! A `Ledger` is an immutable snapshot. Adding or removing an entry returns a
//! new ledger and leaves the original untouched, so analytics can run over a
//! snapshot while the caller prepares the next one.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    entries: Arc<Vec<Transaction>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from already-validated transactions.
    ///
    /// Later entries with an id that was already seen are dropped.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let mut seen: HashSet<String> = HashSet::with_capacity(transactions.len());
        let mut entries: Vec<Transaction> = Vec::with_capacity(transactions.len());
        for tx in transactions {
            if !seen.insert(tx.id.clone()) {
                debug!(id = %tx.id, "Dropping duplicate ledger entry");
                continue;
            }
            entries.push(tx);
        }
        Self {
            entries: Arc::new(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.entries.iter().find(|t| t.id == id)
    }

    /// Validate a candidate, assign it a fresh id and return the new ledger
    /// together with the stored transaction
    pub fn add(&self, new: NewTransaction) -> Result<(Ledger, Transaction)> {
        let tx = Transaction::from_new(Uuid::new_v4().to_string(), new)?;
        let ledger = self.insert(tx.clone())?;
        Ok((ledger, tx))
    }

    /// Insert a transaction that already has an id. Newest entries go first.
    pub fn insert(&self, tx: Transaction) -> Result<Ledger> {
        if self.get(&tx.id).is_some() {
            return Err(Error::Validation(format!(
                "transaction id {} already exists",
                tx.id
            )));
        }
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.push(tx);
        entries.extend(self.entries.iter().cloned());
        Ok(Self {
            entries: Arc::new(entries),
        })
    }

    /// Remove by id. Removing an unknown id returns an equal ledger and `None`.
    pub fn remove(&self, id: &str) -> (Ledger, Option<Transaction>) {
        let Some(pos) = self.entries.iter().position(|t| t.id == id) else {
            return (self.clone(), None);
        };
        let mut entries = self.entries.as_ref().clone();
        let removed = entries.remove(pos);
        (
            Self {
                entries: Arc::new(entries),
            },
            Some(removed),
        )
    }

    /// Find an entry by full id or by a prefix that matches exactly one entry
    pub fn resolve_id(&self, id_or_prefix: &str) -> Result<&Transaction> {
        let needle = id_or_prefix.trim();
        if needle.is_empty() {
            return Err(Error::Validation("transaction id is empty".into()));
        }
        if let Some(tx) = self.get(needle) {
            return Ok(tx);
        }

        let mut matches = self.entries.iter().filter(|t| t.id.starts_with(needle));
        match (matches.next(), matches.next()) {
            (Some(tx), None) => Ok(tx),
            (Some(_), Some(_)) => Err(Error::Validation(format!(
                "id prefix '{}' matches more than one transaction",
                needle
            ))),
            (None, _) => Err(Error::NotFound(format!("transaction {}", needle))),
        }
    }

    /// Entries ordered by date, newest first. Entries on the same date keep
    /// ledger order.
    pub fn by_date_desc(&self) -> Vec<&Transaction> {
        let mut rows: Vec<&Transaction> = self.entries.iter().collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }
}
