//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use budgetlens_core::TransactionKind;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

/// Budgetlens - See where the month's money went
#[derive(Parser)]
#[command(name = "budgetlens")]
#[command(about = "Budget analytics and spending insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data file path
    #[arg(long, default_value = "budget.json", global = true)]
    pub data: PathBuf,

    /// Analytics config file (defaults to the user data dir, then built-in)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Month and year to analyze; each defaults to the current one
#[derive(Args, Clone, Copy, Debug, Default)]
pub struct PeriodArgs {
    /// Month (1-12)
    #[arg(short, long)]
    pub month: Option<u32>,

    /// Year
    #[arg(short, long)]
    pub year: Option<i32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a data file with the default categories
    Init,

    /// List categories
    Categories,

    /// Record a transaction
    Add {
        /// Category name
        #[arg(short, long)]
        category: String,

        /// Amount (positive)
        #[arg(short, long)]
        amount: Decimal,

        /// income or expense
        #[arg(short, long, default_value = "expense")]
        kind: TransactionKind,

        /// Description (defaults to the category name)
        #[arg(short, long)]
        description: Option<String>,

        /// Date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Set a category's budget for a month (replaces an existing one)
    Budget {
        /// Category name
        #[arg(short, long)]
        category: String,

        /// Budgeted amount (positive)
        #[arg(short, long)]
        amount: Decimal,

        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Income, expenses, balance and savings rate for a month
    Summary {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Budget vs actual spending for a month
    Budgets {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Expense share per category, all time
    Breakdown,

    /// Income and expense per month, all time
    Monthly,

    /// Spending insights for a month
    Insights {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Full dashboard report for a month
    Report {
        #[command(flatten)]
        period: PeriodArgs,
    },
}
