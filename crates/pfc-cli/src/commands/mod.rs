//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_db, require_user, date parsing) and init
//! - `profile` - Show, rename and reset the stored profile
//! - `prompts` - Inspect the prompt library and its override directory
//! - `transactions` - Add, delete and list ledger entries
//! - `reports` - Dashboard and monthly/breakdown/item reports
//! - `catalog` - Expense categories and suggested items
//! - `insights` - AI advice and backend health check

pub mod catalog;
pub mod core;
pub mod insights;
pub mod profile;
pub mod prompts;
pub mod reports;
pub mod transactions;

// Re-export command functions for main.rs
pub use catalog::*;
pub use core::*;
pub use insights::*;
pub use profile::*;
pub use prompts::*;
pub use reports::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
