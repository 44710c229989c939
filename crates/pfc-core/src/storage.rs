//! Persistence of the ledger and the user profile
//!
//! Everything lives in a key-value store under two fixed keys. The ledger is
//! a JSON array of transaction records and the profile is the bare name.
//! Reads never fail: a missing or unreadable blob is an empty ledger.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::models::Transaction;

pub const LEDGER_KEY: &str = "pfc_financial_data";
pub const PROFILE_KEY: &str = "pfc_user_profile";

/// String key-value persistence
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    /// Remove every key
    fn clear(&self) -> Result<()>;
}

/// In-process store, used by tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| Error::Validation("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }
}

/// Load the persisted ledger.
///
/// Absent, unreadable or malformed data gives an empty ledger. Individual
/// records that fail validation are skipped with a warning.
pub fn load_ledger(store: &dyn KeyValueStore) -> Ledger {
    let raw = match store.get(LEDGER_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Ledger::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read stored ledger, starting empty");
            return Ledger::new();
        }
    };

    let records: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "Stored ledger is not a JSON array, starting empty");
            return Ledger::new();
        }
    };

    let total = records.len();
    let transactions: Vec<Transaction> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(tx) => Some(tx),
            Err(e) => {
                warn!(index, error = %e, "Skipping invalid stored transaction");
                None
            }
        })
        .collect();

    debug!(loaded = transactions.len(), total, "Ledger loaded");
    Ledger::from_transactions(transactions)
}

/// Persist the whole ledger
pub fn save_ledger(store: &dyn KeyValueStore, ledger: &Ledger) -> Result<()> {
    let raw = serde_json::to_string(ledger.transactions())?;
    store.set(LEDGER_KEY, &raw)?;
    debug!(count = ledger.len(), "Ledger saved");
    Ok(())
}

/// The stored display name, if onboarding has happened
pub fn load_user_name(store: &dyn KeyValueStore) -> Option<String> {
    match store.get(PROFILE_KEY) {
        Ok(name) => name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
        Err(e) => {
            warn!(error = %e, "Failed to read stored profile");
            None
        }
    }
}

/// Store the display name. Surrounding whitespace is dropped; blank names are rejected.
pub fn save_user_name(store: &dyn KeyValueStore, name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation("name must not be empty".into()));
    }
    store.set(PROFILE_KEY, name)?;
    Ok(name.to_string())
}

/// Forget the profile and every transaction
pub fn reset_profile(store: &dyn KeyValueStore) -> Result<()> {
    store.clear()?;
    info!("Profile reset, all stored data removed");
    Ok(())
}
