//! PFC CLI - Personal Financial Companion
//!
//! Usage:
//!   pfc init --name Rahim                          Create profile
//!   pfc add expense --amount 150 --category rent   Record an expense
//!   pfc ledger                                     List entries with trends
//!   pfc insights                                   Ask the AI advisor

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use pfc_core::{AppConfig, PromptLibrary};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring unreadable config, using defaults");
        AppConfig::default()
    });

    match cli.command {
        Commands::Init { name } => commands::cmd_init(&cli.db, &name, cli.no_encrypt),
        Commands::Profile { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(ProfileAction::Show) => commands::cmd_profile_show(&db, &config),
                Some(ProfileAction::Set { name }) => commands::cmd_profile_set(&db, &name),
                Some(ProfileAction::Reset { yes }) => commands::cmd_profile_reset(&db, yes),
            }
        }
        Commands::Add { entry } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::require_user(&db)?;
            match entry {
                AddEntry::Income {
                    amount,
                    source,
                    date,
                    note,
                } => commands::cmd_add_income(
                    &db,
                    &config,
                    amount,
                    &source,
                    date.as_deref(),
                    note.as_deref(),
                )
                .map(|_| ()),
                AddEntry::Expense {
                    amount,
                    category,
                    item,
                    date,
                    note,
                } => commands::cmd_add_expense(
                    &db,
                    &config,
                    amount,
                    &category,
                    item.as_deref(),
                    date.as_deref(),
                    note.as_deref(),
                )
                .map(|_| ()),
            }
        }
        Commands::Delete { id } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::require_user(&db)?;
            commands::cmd_delete(&db, &config, &id)
        }
        Commands::Ledger { limit } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::require_user(&db)?;
            commands::cmd_ledger(&db, &config, limit)
        }
        Commands::Dashboard => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let name = commands::require_user(&db)?;
            commands::cmd_dashboard(&db, &config, &name)
        }
        Commands::Report { report_type } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::require_user(&db)?;
            match report_type {
                ReportType::Monthly => commands::cmd_report_monthly(&db, &config),
                ReportType::Breakdown => commands::cmd_report_breakdown(&db, &config),
                ReportType::Items => commands::cmd_report_items(&db, &config),
            }
        }
        Commands::Categories { category } => commands::cmd_categories(category.as_deref()),
        Commands::Insights => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let name = commands::require_user(&db)?;
            let client = commands::ai_client_from_env(&config)?;
            commands::cmd_insights(&db, &config, client, &name)
                .await
                .map(|_| ())
        }
        Commands::Prompts { action } => {
            let mut library = PromptLibrary::new();
            match action {
                None | Some(PromptsAction::List) => commands::cmd_prompts_list(&mut library),
                Some(PromptsAction::Show { prompt_id }) => {
                    commands::cmd_prompts_show(&mut library, &prompt_id)
                }
                Some(PromptsAction::Path) => commands::cmd_prompts_path(&library),
            }
        }
        Commands::Ai { action } => match action {
            AiAction::Test => {
                let client = commands::ai_client_from_env(&config)?;
                commands::cmd_ai_test(&client).await
            }
        },
    }
}
