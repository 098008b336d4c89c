//! Report command implementations

use anyhow::Result;
use budgetlens_core::{
    aggregate, analyze_period, compare,
    format::{fixed, money},
    sort_by_category, summarize, AnalyticsConfig, BudgetStatus, CategorySlice, ComparisonRow,
    FactStore, Insight, InsightKind, MonthlyPoint, Period, Summary, TransactionScope,
};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{truncate, Output};

/// A comparison row with its derived usage figures, for output
#[derive(Debug, Serialize)]
pub struct BudgetLine<'a> {
    #[serde(flatten)]
    pub row: &'a ComparisonRow,
    pub overspend: Decimal,
    pub percent_used: Option<Decimal>,
    pub status: BudgetStatus,
}

impl<'a> BudgetLine<'a> {
    pub fn new(row: &'a ComparisonRow, config: &AnalyticsConfig) -> Self {
        Self {
            row,
            overspend: row.overspend(),
            percent_used: row.percent_used(),
            status: row.status(config.thresholds.near_limit_percent),
        }
    }
}

pub fn cmd_summary(
    store: &dyn FactStore,
    period: Period,
    config: &AnalyticsConfig,
    output: Output,
) -> Result<()> {
    let facts = store.facts(period)?;
    let summary = summarize(&facts.transactions);

    if output.is_json() {
        return output.print_json(&summary);
    }
    print_summary(&summary, period, config);
    Ok(())
}

pub fn cmd_budgets(
    store: &dyn FactStore,
    period: Period,
    config: &AnalyticsConfig,
    output: Output,
) -> Result<()> {
    let facts = store.facts(period)?;
    let aggregation = aggregate(&facts.transactions, config.category_key);
    let mut rows = compare(&facts.budgets, &aggregation, config.category_key);
    sort_by_category(&mut rows);

    if output.is_json() {
        let lines: Vec<BudgetLine<'_>> = rows.iter().map(|r| BudgetLine::new(r, config)).collect();
        return output.print_json(&lines);
    }
    print_budgets(&rows, period, config);
    Ok(())
}

pub fn cmd_breakdown(store: &dyn FactStore, config: &AnalyticsConfig, output: Output) -> Result<()> {
    let transactions = store.transactions(TransactionScope::All)?;
    let slices = aggregate(&transactions, config.category_key).category_breakdown();

    if output.is_json() {
        return output.print_json(&slices);
    }
    print_breakdown(&slices, config);
    Ok(())
}

pub fn cmd_monthly(store: &dyn FactStore, config: &AnalyticsConfig, output: Output) -> Result<()> {
    let transactions = store.transactions(TransactionScope::All)?;
    let points = aggregate(&transactions, config.category_key)
        .monthly_series(config.merge_months_across_years);

    if output.is_json() {
        return output.print_json(&points);
    }
    print_monthly(&points, config);
    Ok(())
}

pub fn cmd_insights(
    store: &dyn FactStore,
    period: Period,
    config: &AnalyticsConfig,
    output: Output,
) -> Result<()> {
    let report = analyze_period(store, period, config)?;

    if output.is_json() {
        return output.print_json(&report.insights);
    }
    print_insights(&report.insights, period);
    Ok(())
}

pub fn cmd_report(
    store: &dyn FactStore,
    period: Period,
    config: &AnalyticsConfig,
    output: Output,
) -> Result<()> {
    let report = analyze_period(store, period, config)?;

    if output.is_json() {
        return output.print_json(&report);
    }

    print_summary(&report.summary, period, config);
    print_budgets(&report.comparisons, period, config);
    print_insights(&report.insights, period);
    print_breakdown(&report.breakdown, config);
    print_monthly(&report.monthly, config);
    Ok(())
}

fn print_summary(summary: &Summary, period: Period, config: &AnalyticsConfig) {
    let symbol = &config.currency_symbol;

    println!();
    println!("📊 Summary for {}", period);
    println!("   ─────────────────────────────────────────────");
    println!("   Income:        {:>14}", money(symbol, summary.total_income));
    println!("   Expenses:      {:>14}", money(symbol, summary.total_expenses));
    println!("   Balance:       {:>14}", money(symbol, summary.balance));
    println!("   Transactions:  {:>14}", summary.transaction_count);
    match summary.savings_rate {
        Some(rate) => println!("   Savings rate:  {:>13}%", fixed(rate, 1)),
        None => println!("   Savings rate:  {:>14}", "n/a"),
    }
}

fn print_budgets(rows: &[ComparisonRow], period: Period, config: &AnalyticsConfig) {
    let symbol = &config.currency_symbol;

    println!();
    println!("🎯 Budgets for {}", period);
    println!("   ─────────────────────────────────────────────────────────────────────");

    if rows.is_empty() {
        println!("   No budgets set for this month.");
        return;
    }

    println!(
        "   {:22} │ {:>12} │ {:>12} │ {:>12} │ {:>5}",
        "Category", "Budgeted", "Spent", "Remaining", "Used"
    );
    println!("   ───────────────────────┼──────────────┼──────────────┼──────────────┼───────");

    for row in rows {
        let line = BudgetLine::new(row, config);
        let icon = match line.status {
            BudgetStatus::Over => "🔴",
            BudgetStatus::Near => "🟡",
            BudgetStatus::Ok => "🟢",
        };
        let used = line
            .percent_used
            .map(|p| format!("{}%", fixed(p, 0)))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "   {:22} │ {:>12} │ {:>12} │ {:>12} │ {:>5} {}",
            truncate(&row.category, 22),
            money(symbol, row.budgeted),
            money(symbol, row.actual),
            money(symbol, row.remaining),
            used,
            icon
        );
    }
}

fn print_breakdown(slices: &[CategorySlice], config: &AnalyticsConfig) {
    println!();
    println!("🥧 Spending by Category (all time)");
    println!("   ─────────────────────────────────────────────");

    if slices.is_empty() {
        println!("   No expenses recorded.");
        return;
    }

    for slice in slices {
        println!(
            "   {:25} │ {:>14} │ {:>5}%",
            truncate(&slice.name, 25),
            money(&config.currency_symbol, slice.amount),
            fixed(slice.percentage, 1)
        );
    }
}

fn print_monthly(points: &[MonthlyPoint], config: &AnalyticsConfig) {
    let symbol = &config.currency_symbol;

    println!();
    println!("📅 Monthly Income vs Expenses");
    println!("   ─────────────────────────────────────────────");

    if points.is_empty() {
        println!("   No transactions recorded.");
        return;
    }

    println!("   {:10} │ {:>14} │ {:>14}", "Month", "Income", "Expenses");
    println!("   ───────────┼────────────────┼───────────────");
    for point in points {
        println!(
            "   {:10} │ {:>14} │ {:>14}",
            point.label,
            money(symbol, point.income),
            money(symbol, point.expense)
        );
    }
}

fn print_insights(insights: &[Insight], period: Period) {
    println!();
    println!("💡 Insights for {}", period);
    println!("   ─────────────────────────────────────────────");

    if insights.is_empty() {
        println!("   Nothing to report this month.");
        return;
    }

    for insight in insights {
        let icon = match insight.kind {
            InsightKind::Warning => "⚠️ ",
            InsightKind::Info => "ℹ️ ",
            InsightKind::Success => "✅",
        };
        println!("   {} {}", icon, insight.title);
        println!("      {}", insight.description);
    }
}
