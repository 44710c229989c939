//! Profile command implementations

use anyhow::{Context, Result};
use pfc_core::db::Database;
use pfc_core::storage::{load_ledger, load_user_name, reset_profile, save_user_name};
use pfc_core::{summarize, AppConfig};

pub fn cmd_profile_show(db: &Database, config: &AppConfig) -> Result<()> {
    let Some(name) = load_user_name(db) else {
        println!("No profile yet. Create one with:");
        println!("  pfc init --name <NAME>");
        return Ok(());
    };

    let ledger = load_ledger(db);
    let stats = summarize(ledger.transactions());

    println!();
    println!("👤 Profile");
    println!("   ─────────────────────────────────────────");
    println!("   Name:         {}", name);
    println!("   Database:     {}", db.path());
    println!(
        "   Encryption:   {}",
        if db.is_encrypted() { "enabled" } else { "disabled" }
    );
    println!("   Transactions: {}", ledger.len());
    println!("   Balance:      {}", config.money(stats.balance));

    Ok(())
}

pub fn cmd_profile_set(db: &Database, name: &str) -> Result<()> {
    let previous = load_user_name(db);
    let name = save_user_name(db, name).context("Invalid name")?;

    match previous {
        Some(old) if old != name => println!("✅ Name changed from {} to {}", old, name),
        _ => println!("✅ Name set to {}", name),
    }
    Ok(())
}

/// Delete the profile and every transaction.
///
/// Without `confirmed` this only explains what would happen.
pub fn cmd_profile_reset(db: &Database, confirmed: bool) -> Result<()> {
    let count = load_ledger(db).len();

    if !confirmed {
        println!("⚠️  This deletes your name and all {} transactions.", count);
        println!("   Run again with --yes to confirm:");
        println!("   pfc profile reset --yes");
        return Ok(());
    }

    reset_profile(db).context("Failed to reset profile")?;
    println!("🗑️  Profile reset. Removed {} transactions.", count);
    println!("   Start again with: pfc init --name <NAME>");
    Ok(())
}
