//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `require_user` - Gate for commands that need a profile
//! - `cmd_init` - Create the database and store the user's name

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate};
use pfc_core::db::Database;
use pfc_core::models::parse_date;
use pfc_core::storage::{load_user_name, save_user_name};

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow!("Database path is not valid UTF-8: {}", db_path.display()))?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// The stored user name. Everything except `init` and `profile` is gated on it.
pub fn require_user(db: &Database) -> Result<String> {
    match load_user_name(db) {
        Some(name) => Ok(name),
        None => bail!("No profile found. Run: pfc init --name <NAME>"),
    }
}

/// Parse a `--date` argument, defaulting to today
pub fn parse_date_arg(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => parse_date(s).context("Expected a date like 2024-03-15"),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn cmd_init(db_path: &Path, name: &str, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;
    init_profile(&db, name)?;

    if db.is_encrypted() {
        println!("   🔒 Encryption: ENABLED");
    } else {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    }

    println!();
    println!("Next steps:");
    println!("  1. Record income:   pfc add income --amount 50000 --source salary");
    println!("  2. Record expenses: pfc add expense --amount 150 --category \"Monthly Groceries\" --item Rice");
    println!("  3. Ask for advice:  pfc insights");

    Ok(())
}

/// Store the name on an open database
pub fn init_profile(db: &Database, name: &str) -> Result<String> {
    if let Some(existing) = load_user_name(db) {
        println!("   Replacing existing profile '{}'", existing);
    }
    let name = save_user_name(db, name).context("Invalid name")?;
    println!("✅ Welcome, {}!", name);
    Ok(name)
}
