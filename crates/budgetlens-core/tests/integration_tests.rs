//! Integration tests for budgetlens-core
//!
//! These tests exercise the full data file → report workflow.

use budgetlens_core::{
    aggregate, analyze_period, compare, summarize, AnalyticsConfig, CategoryKey, FactStore,
    InsightKind, JsonFileStore, NewBudget, NewTransaction, Period, RuleId, TransactionKind,
    TransactionScope,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

/// Fresh data file with the default categories
fn data_file(dir: &TempDir) -> JsonFileStore {
    JsonFileStore::init(dir.path().join("budget.json")).expect("Failed to init data file")
}

fn category_id(store: &JsonFileStore, name: &str) -> String {
    store
        .store()
        .category_by_name(name)
        .unwrap_or_else(|| panic!("missing category {}", name))
        .id
        .clone()
}

fn record(store: &mut JsonFileStore, category: &str, amount: Decimal, kind: TransactionKind, on: &str) {
    let category_id = category_id(store, category);
    store
        .add_transaction(NewTransaction {
            amount,
            description: format!("{} {}", kind, category),
            date: NaiveDate::parse_from_str(on, "%Y-%m-%d").unwrap(),
            kind,
            category_id,
        })
        .unwrap();
}

fn budget(store: &mut JsonFileStore, category: &str, amount: Decimal) {
    let category_id = category_id(store, category);
    store
        .upsert_budget(NewBudget {
            amount,
            month: 3,
            year: 2025,
            category_id,
        })
        .unwrap();
}

fn march() -> Period {
    Period::new(3, 2025).unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_over_budget_scenario() {
    let dir = TempDir::new().unwrap();
    let mut store = data_file(&dir);
    budget(&mut store, "Food & Dining", dec!(1000));
    record(&mut store, "Food & Dining", dec!(1200), TransactionKind::Expense, "2025-03-10");
    store.save().unwrap();

    let store = JsonFileStore::open(store.path()).unwrap();
    let report = analyze_period(&store, march(), &AnalyticsConfig::default()).unwrap();

    assert_eq!(report.comparisons.len(), 1);
    let row = &report.comparisons[0];
    assert_eq!(row.budgeted, dec!(1000));
    assert_eq!(row.actual, dec!(1200));
    assert_eq!(row.remaining, Decimal::ZERO);

    let warnings: Vec<_> = report
        .insights
        .iter()
        .filter(|i| i.kind == InsightKind::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].title, "Over Budget: Food & Dining");
    assert!(warnings[0].description.ends_with("(120%)"));
    assert!(!report.insights.iter().any(|i| i.rule == RuleId::ApproachingLimit));
}

#[test]
fn test_approaching_limit_scenario() {
    let dir = TempDir::new().unwrap();
    let mut store = data_file(&dir);
    budget(&mut store, "Food & Dining", dec!(1000));
    record(&mut store, "Food & Dining", dec!(850), TransactionKind::Expense, "2025-03-10");

    let report = analyze_period(&store, march(), &AnalyticsConfig::default()).unwrap();

    let alerts: Vec<_> = report
        .insights
        .iter()
        .filter(|i| matches!(i.rule, RuleId::OverBudget | RuleId::ApproachingLimit))
        .collect();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, InsightKind::Info);
    assert_eq!(alerts[0].title, "Approaching Budget Limit: Food & Dining");
    assert_eq!(
        alerts[0].description,
        "You've spent 85% of your budget for Food & Dining"
    );
    assert!(!report.insights.iter().any(|i| i.kind == InsightKind::Warning));
}

#[test]
fn test_high_savings_scenario() {
    let dir = TempDir::new().unwrap();
    let mut store = data_file(&dir);
    record(&mut store, "Income", dec!(5000), TransactionKind::Income, "2025-03-01");
    record(&mut store, "Shopping", dec!(1000), TransactionKind::Expense, "2025-03-03");

    let report = analyze_period(&store, march(), &AnalyticsConfig::default()).unwrap();

    assert_eq!(report.summary.total_income, dec!(5000));
    assert_eq!(report.summary.total_expenses, dec!(1000));
    assert_eq!(report.summary.balance, dec!(4000));
    assert_eq!(report.summary.savings_rate, Some(dec!(80)));
    assert!(report.insights.iter().any(|i| i.kind == InsightKind::Success));
}

#[test]
fn test_low_savings_scenario() {
    let dir = TempDir::new().unwrap();
    let mut store = data_file(&dir);
    record(&mut store, "Income", dec!(1000), TransactionKind::Income, "2025-03-01");
    record(&mut store, "Shopping", dec!(980), TransactionKind::Expense, "2025-03-03");

    let report = analyze_period(&store, march(), &AnalyticsConfig::default()).unwrap();

    assert_eq!(report.summary.savings_rate, Some(dec!(2)));
    assert!(report
        .insights
        .iter()
        .any(|i| i.kind == InsightKind::Warning && i.title == "Low Savings Rate"));
    assert!(!report.insights.iter().any(|i| i.kind == InsightKind::Success));
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_expense_totals_conserved() {
    let dir = TempDir::new().unwrap();
    let mut store = data_file(&dir);
    record(&mut store, "Food & Dining", dec!(12.40), TransactionKind::Expense, "2025-01-03");
    record(&mut store, "Food & Dining", dec!(7.60), TransactionKind::Expense, "2025-03-03");
    record(&mut store, "Travel", dec!(410), TransactionKind::Expense, "2024-11-20");
    record(&mut store, "Income", dec!(3000), TransactionKind::Income, "2025-03-01");

    let all = store.transactions(TransactionScope::All).unwrap();
    let aggregation = aggregate(&all, CategoryKey::Id);

    let by_category: Decimal = aggregation
        .expense_by_category
        .values()
        .map(|t| t.amount)
        .sum();
    let direct: Decimal = all
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum();
    assert_eq!(by_category, direct);
    assert_eq!(by_category, dec!(430));
}

#[test]
fn test_one_row_per_budget_never_negative() {
    let dir = TempDir::new().unwrap();
    let mut store = data_file(&dir);
    budget(&mut store, "Food & Dining", dec!(100));
    budget(&mut store, "Travel", dec!(50));
    budget(&mut store, "Pets", dec!(80));
    record(&mut store, "Travel", dec!(75), TransactionKind::Expense, "2025-03-09");
    record(&mut store, "Shopping", dec!(30), TransactionKind::Expense, "2025-03-09");

    let facts = store.facts(march()).unwrap();
    let aggregation = aggregate(&facts.transactions, CategoryKey::Name);
    let rows = compare(&facts.budgets, &aggregation, CategoryKey::Name);

    assert_eq!(rows.len(), facts.budgets.len());
    assert!(rows.iter().all(|r| r.remaining >= Decimal::ZERO));
}

#[test]
fn test_empty_period_has_no_insights() {
    let dir = TempDir::new().unwrap();
    let store = data_file(&dir);

    let report = analyze_period(&store, march(), &AnalyticsConfig::default()).unwrap();
    assert!(report.insights.is_empty());
    assert_eq!(report.summary.savings_rate, None);
}

#[test]
fn test_no_savings_insight_without_income() {
    let dir = TempDir::new().unwrap();
    let mut store = data_file(&dir);
    record(&mut store, "Shopping", dec!(250), TransactionKind::Expense, "2025-03-03");

    let report = analyze_period(&store, march(), &AnalyticsConfig::default()).unwrap();
    assert!(!report.insights.iter().any(|i| i.rule == RuleId::SavingsRate));
    assert_eq!(summarize(&store.facts(march()).unwrap().transactions).total_income, Decimal::ZERO);
}

#[test]
fn test_report_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let mut store = data_file(&dir);
    budget(&mut store, "Food & Dining", dec!(300));
    budget(&mut store, "Travel", dec!(200));
    record(&mut store, "Food & Dining", dec!(280), TransactionKind::Expense, "2025-03-02");
    record(&mut store, "Travel", dec!(260), TransactionKind::Expense, "2025-03-05");
    record(&mut store, "Income", dec!(600), TransactionKind::Income, "2025-03-01");

    let config = AnalyticsConfig::default();
    let first = serde_json::to_string(&analyze_period(&store, march(), &config).unwrap()).unwrap();
    let second = serde_json::to_string(&analyze_period(&store, march(), &config).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_config_thresholds_flow_into_report() {
    let dir = TempDir::new().unwrap();
    let mut store = data_file(&dir);
    budget(&mut store, "Food & Dining", dec!(1000));
    record(&mut store, "Food & Dining", dec!(700), TransactionKind::Expense, "2025-03-10");

    let config = budgetlens_core::parse_config(
        r#"
[insights]
near_limit_percent = 60

[display]
currency_symbol = "$"
"#,
    )
    .unwrap();
    let report = analyze_period(&store, march(), &config).unwrap();

    assert!(report.insights.iter().any(|i| i.rule == RuleId::ApproachingLimit));
    let top = report
        .insights
        .iter()
        .find(|i| i.rule == RuleId::TopCategory)
        .unwrap();
    assert!(top.description.ends_with("($700.00)"));
}
