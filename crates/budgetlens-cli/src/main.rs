//! Budgetlens CLI - Budget analytics and spending insights
//!
//! Usage:
//!   budgetlens init                          Create a data file
//!   budgetlens add -c Travel -a 120          Record an expense
//!   budgetlens budget -c Travel -a 500       Budget the current month
//!   budgetlens report --month 3 --year 2025  Dashboard for March 2025

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

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
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let output = commands::Output::new(cli.json);

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.data),
        Commands::Categories => {
            let store = commands::open_store(&cli.data)?;
            commands::cmd_categories(&store, output)
        }
        Commands::Add {
            category,
            amount,
            kind,
            description,
            date,
        } => {
            let mut store = commands::open_store(&cli.data)?;
            commands::cmd_add(&mut store, &category, amount, kind, description, date)
        }
        Commands::Budget {
            category,
            amount,
            period,
        } => {
            let mut store = commands::open_store(&cli.data)?;
            let period = commands::resolve_period(period)?;
            commands::cmd_budget(&mut store, &category, amount, period)
        }
        Commands::Summary { period } => {
            let (store, config) = commands::open_all(&cli.data, cli.config.as_deref())?;
            commands::cmd_summary(&store, commands::resolve_period(period)?, &config, output)
        }
        Commands::Budgets { period } => {
            let (store, config) = commands::open_all(&cli.data, cli.config.as_deref())?;
            commands::cmd_budgets(&store, commands::resolve_period(period)?, &config, output)
        }
        Commands::Breakdown => {
            let (store, config) = commands::open_all(&cli.data, cli.config.as_deref())?;
            commands::cmd_breakdown(&store, &config, output)
        }
        Commands::Monthly => {
            let (store, config) = commands::open_all(&cli.data, cli.config.as_deref())?;
            commands::cmd_monthly(&store, &config, output)
        }
        Commands::Insights { period } => {
            let (store, config) = commands::open_all(&cli.data, cli.config.as_deref())?;
            commands::cmd_insights(&store, commands::resolve_period(period)?, &config, output)
        }
        Commands::Report { period } => {
            let (store, config) = commands::open_all(&cli.data, cli.config.as_deref())?;
            commands::cmd_report(&store, commands::resolve_period(period)?, &config, output)
        }
    }
}
