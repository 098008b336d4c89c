//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_store` / `open_all` - Shared utilities to load the data file and config
//! - `resolve_period` - Fill in the current month/year for missing flags
//! - `cmd_init` - Create a data file
//! - `cmd_categories`, `cmd_add`, `cmd_budget` - Data entry

use std::path::Path;

use anyhow::{Context, Result};
use budgetlens_core::{
    format::fixed, AnalyticsConfig, FactStore, JsonFileStore, NewBudget, NewTransaction, Period,
    TransactionKind,
};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use super::{truncate, Output};
use crate::cli::PeriodArgs;

/// Load the data file
pub fn open_store(data_path: &Path) -> Result<JsonFileStore> {
    JsonFileStore::open(data_path).with_context(|| {
        format!(
            "Failed to open data file {} (run `budgetlens init` first)",
            data_path.display()
        )
    })
}

/// Load the data file and the analytics config
pub fn open_all(data_path: &Path, config_path: Option<&Path>) -> Result<(JsonFileStore, AnalyticsConfig)> {
    let store = open_store(data_path)?;
    let config = AnalyticsConfig::load(config_path).context("Failed to load analytics config")?;
    tracing::debug!(
        data = %data_path.display(),
        config = %config_path.map(|p| p.display().to_string()).unwrap_or_else(|| "default".to_string()),
        category_key = config.category_key.as_str(),
        "Loaded data file and config"
    );
    Ok((store, config))
}

/// Resolve --month/--year against the current period
pub fn resolve_period(args: PeriodArgs) -> Result<Period> {
    let current = Period::current();
    Period::new(
        args.month.unwrap_or(current.month),
        args.year.unwrap_or(current.year),
    )
    .context("Invalid period")
}

pub fn cmd_init(data_path: &Path) -> Result<()> {
    println!("🔧 Initializing data file at {}...", data_path.display());

    let store = JsonFileStore::init(data_path).context("Failed to initialize data file")?;
    println!(
        "   Seeded {} default categories",
        store.categories()?.len()
    );

    println!("✅ Data file initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Set a budget: budgetlens budget -c \"Food & Dining\" -a 500");
    println!("  2. Record spending: budgetlens add -c \"Food & Dining\" -a 42.50");
    println!("  3. See the month: budgetlens report");

    Ok(())
}

pub fn cmd_categories(store: &JsonFileStore, output: Output) -> Result<()> {
    let categories = store.categories()?;
    if output.is_json() {
        return output.print_json(&categories);
    }

    println!();
    println!("🏷️  Categories ({})", categories.len());
    println!("   ─────────────────────────────────────────────");
    println!("   {:25} │ {:8} │ {}", "Name", "Color", "Icon");
    println!("   ──────────────────────────┼──────────┼──────────────");
    for category in &categories {
        println!(
            "   {:25} │ {:8} │ {}",
            truncate(&category.name, 25),
            category.color,
            category.icon
        );
    }

    Ok(())
}

pub fn cmd_add(
    store: &mut JsonFileStore,
    category: &str,
    amount: Decimal,
    kind: TransactionKind,
    description: Option<String>,
    date: Option<NaiveDate>,
) -> Result<()> {
    let category = store
        .store()
        .category_by_name(category)
        .cloned()
        .with_context(|| format!("Unknown category '{}' (see `budgetlens categories`)", category))?;

    let tx = store.add_transaction(NewTransaction {
        amount,
        description: description.unwrap_or_else(|| category.name.clone()),
        date: date.unwrap_or_else(|| Local::now().date_naive()),
        kind,
        category_id: category.id.clone(),
    })?;
    store.save().context("Failed to save data file")?;
    tracing::info!(
        id = tx.id.as_str(),
        category = tx.category.name.as_str(),
        amount = %tx.amount,
        "Recorded transaction"
    );

    println!(
        "✅ Recorded {} of {} in {} on {}",
        tx.kind,
        fixed(tx.amount, 2),
        tx.category.name,
        tx.date
    );
    Ok(())
}

pub fn cmd_budget(
    store: &mut JsonFileStore,
    category: &str,
    amount: Decimal,
    period: Period,
) -> Result<()> {
    let category = store
        .store()
        .category_by_name(category)
        .cloned()
        .with_context(|| format!("Unknown category '{}' (see `budgetlens categories`)", category))?;

    let budget = store.upsert_budget(NewBudget {
        amount,
        month: period.month,
        year: period.year,
        category_id: category.id,
    })?;
    store.save().context("Failed to save data file")?;
    tracing::info!(
        id = budget.id.as_str(),
        category = budget.category.name.as_str(),
        period = %period,
        amount = %budget.amount,
        "Saved budget"
    );

    println!(
        "✅ Budget for {} in {} set to {}",
        budget.category.name,
        period,
        fixed(budget.amount, 2)
    );
    Ok(())
}
