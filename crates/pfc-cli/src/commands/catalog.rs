//! Category listing

use anyhow::{anyhow, Result};
use pfc_core::catalog::suggested_items;
use pfc_core::models::{ExpenseCategory, IncomeSource};

pub fn cmd_categories(category: Option<&str>) -> Result<()> {
    let categories: Vec<ExpenseCategory> = match category {
        Some(name) => vec![name.parse().map_err(|e: String| anyhow!(e))?],
        None => ExpenseCategory::all().to_vec(),
    };

    if category.is_none() {
        let sources: Vec<&str> = IncomeSource::all().iter().map(|s| s.as_str()).collect();
        println!();
        println!("💰 Income sources: {}", sources.join(", "));
    }

    println!();
    println!("💸 Expense categories");
    for category in categories {
        println!();
        println!("   {}", category);
        for item in suggested_items(category) {
            println!("      • {}", item);
        }
    }
    println!();
    println!("   Any other item name is accepted as a custom label.");

    Ok(())
}
