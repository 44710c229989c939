//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// PFC - Personal Financial Companion
#[derive(Parser)]
#[command(name = "pfc")]
#[command(about = "Track household income and expenses, with AI advice", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "pfc.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set PFC_DB_KEY environment variable with your passphrase.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and store your name
    Init {
        /// Name the advisor addresses you by
        #[arg(short, long)]
        name: String,
    },

    /// Show, change or reset the stored profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },

    /// Record an income or expense
    Add {
        #[command(subcommand)]
        entry: AddEntry,
    },

    /// Delete a transaction by id (a unique prefix is enough)
    Delete {
        /// Transaction id or prefix
        id: String,
    },

    /// List transactions, newest first, with price trend badges
    Ledger {
        /// Maximum rows to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show total income, expense and balance
    Dashboard,

    /// Generate reports
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// List expense categories and their suggested items
    Categories {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Ask the AI advisor for a review of your finances
    Insights,

    /// Inspect the advisor prompt and where overrides go
    Prompts {
        #[command(subcommand)]
        action: Option<PromptsAction>,
    },

    /// AI backend utilities
    Ai {
        #[command(subcommand)]
        action: AiAction,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the stored name and data summary
    Show,

    /// Change the stored name
    Set {
        /// New name
        name: String,
    },

    /// Delete the profile and every transaction
    Reset {
        /// Skip the confirmation notice
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum AddEntry {
    /// Record income
    Income {
        /// Amount (non-negative)
        #[arg(short, long)]
        amount: f64,

        /// Source: salary, freelancing, business, investments, rental, others
        #[arg(short, long)]
        source: String,

        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,

        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Record an expense
    Expense {
        /// Amount (non-negative)
        #[arg(short, long)]
        amount: f64,

        /// Category (see `pfc categories`)
        #[arg(short, long)]
        category: String,

        /// Item within the category (defaults to the first suggestion)
        #[arg(short, long)]
        item: Option<String>,

        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,

        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Income, expense and balance per month
    Monthly,

    /// Totals per income source and expense category
    Breakdown,

    /// Expense totals per item
    Items,
}

#[derive(Subcommand)]
pub enum PromptsAction {
    /// List all available prompts and their override status
    List,

    /// Show the content of a specific prompt
    Show {
        /// Prompt ID (e.g., financial_advice)
        prompt_id: String,
    },

    /// Show the path where prompt overrides should be placed
    Path,
}

#[derive(Subcommand)]
pub enum AiAction {
    /// Check that the configured backend is reachable
    Test,
}
