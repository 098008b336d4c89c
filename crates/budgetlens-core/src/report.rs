//! Period report: everything the dashboard shows for one month

use serde::{Deserialize, Serialize};

use crate::analytics::{aggregate, compare, sort_by_category, summarize};
use crate::config::AnalyticsConfig;
use crate::error::Result;
use crate::insights::{AnalysisContext, Insight, InsightEngine};
use crate::models::{Budget, CategorySlice, ComparisonRow, MonthlyPoint, Period, Summary, Transaction};
use crate::store::{FactStore, TransactionScope};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodReport {
    pub period: Period,
    /// Totals over the period's transactions
    pub summary: Summary,
    /// One row per budget, by category name
    pub comparisons: Vec<ComparisonRow>,
    /// Expense share per category over all transactions
    pub breakdown: Vec<CategorySlice>,
    /// Income and expense per month over all transactions
    pub monthly: Vec<MonthlyPoint>,
    pub insights: Vec<Insight>,
}

impl PeriodReport {
    /// Build a report from already-fetched facts.
    ///
    /// `period_transactions` feed the summary, comparisons and insights;
    /// `all_transactions` feed the breakdown and monthly charts.
    pub fn from_facts(
        period: Period,
        period_transactions: &[Transaction],
        all_transactions: &[Transaction],
        budgets: &[Budget],
        config: &AnalyticsConfig,
    ) -> Self {
        let period_agg = aggregate(period_transactions, config.category_key);
        let summary = summarize(period_transactions);

        let mut comparisons = compare(budgets, &period_agg, config.category_key);
        sort_by_category(&mut comparisons);

        let ctx = AnalysisContext::new(&comparisons, &period_agg, &summary, config);
        let insights = InsightEngine::new().analyze(&ctx);

        let chart_agg = aggregate(all_transactions, config.category_key);
        let breakdown = chart_agg.category_breakdown();
        let monthly = chart_agg.monthly_series(config.merge_months_across_years);

        Self {
            period,
            summary,
            comparisons,
            breakdown,
            monthly,
            insights,
        }
    }
}

/// Fetch a period's facts from the store and analyze them
pub fn analyze_period(
    store: &dyn FactStore,
    period: Period,
    config: &AnalyticsConfig,
) -> Result<PeriodReport> {
    let facts = store.facts(period)?;
    let all = store.transactions(TransactionScope::All)?;

    let report = PeriodReport::from_facts(period, &facts.transactions, &all, &facts.budgets, config);

    tracing::info!(
        period = %period,
        transactions = facts.transactions.len(),
        budgets = facts.budgets.len(),
        insights = report.insights.len(),
        "Analyzed period"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::RuleId;
    use crate::store::InMemoryStore;
    use crate::test_utils::StoreFixtures;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn march() -> Period {
        Period::new(3, 2025).unwrap()
    }

    #[test]
    fn test_empty_store() {
        let store = InMemoryStore::new();
        let report = analyze_period(&store, march(), &AnalyticsConfig::default()).unwrap();

        assert_eq!(report.summary.total_income, Decimal::ZERO);
        assert!(report.comparisons.is_empty());
        assert!(report.breakdown.is_empty());
        assert!(report.monthly.is_empty());
        assert!(report.insights.is_empty());
    }

    #[test]
    fn test_period_vs_chart_scope() {
        let mut store = InMemoryStore::new();
        store.earn("Salary", dec!(5000), "2025-03-01");
        store.spend("Food", dec!(300), "2025-03-05");
        store.spend("Food", dec!(700), "2025-02-10");
        store.set_budget("Food", dec!(500), 3, 2025);
        store.set_budget("Food", dec!(100), 2, 2025);

        let report = analyze_period(&store, march(), &AnalyticsConfig::default()).unwrap();

        assert_eq!(report.summary.total_expenses, dec!(300));
        assert_eq!(report.comparisons.len(), 1);
        assert_eq!(report.comparisons[0].actual, dec!(300));
        assert_eq!(report.comparisons[0].remaining, dec!(200));

        assert_eq!(report.breakdown.len(), 1);
        assert_eq!(report.breakdown[0].amount, dec!(1000));
        let labels: Vec<&str> = report.monthly.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Feb", "Mar"]);
    }

    #[test]
    fn test_comparisons_sorted_and_insights_ordered() {
        let mut store = InMemoryStore::new();
        store.earn("Salary", dec!(1000), "2025-03-01");
        store.spend("Rent", dec!(900), "2025-03-02");
        store.spend("Food", dec!(190), "2025-03-03");
        store.set_budget("Rent", dec!(800), 3, 2025);
        store.set_budget("Food", dec!(200), 3, 2025);

        let report = analyze_period(&store, march(), &AnalyticsConfig::default()).unwrap();

        let names: Vec<&str> = report.comparisons.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(names, vec!["Food", "Rent"]);

        let rules: Vec<RuleId> = report.insights.iter().map(|i| i.rule).collect();
        assert_eq!(
            rules,
            vec![
                RuleId::OverBudget,
                RuleId::ApproachingLimit,
                RuleId::TopCategory,
                RuleId::SavingsRate,
            ]
        );
        assert_eq!(report.insights[0].title, "Over Budget: Rent");
        assert_eq!(report.insights[1].description, "You've spent 95% of your budget for Food");
    }

    #[test]
    fn test_report_serializes() {
        let mut store = InMemoryStore::new();
        store.spend("Food", dec!(12.5), "2025-03-05");

        let report = analyze_period(&store, march(), &AnalyticsConfig::default()).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let back: PeriodReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
