//! Budget Alert Rules
//!
//! Each comparison row is classified once (`BudgetStatus`), then rendered
//! by at most one of:
//! - Over budget (warning) - actual spending exceeds the budget
//! - Approaching limit (info) - spending passed the near-limit threshold

use rust_decimal::Decimal;

use crate::analytics::BudgetStatus;
use crate::format::{fixed, money};
use crate::models::ComparisonRow;

use super::engine::{AnalysisContext, InsightRule};
use super::types::{BudgetUsageData, Insight, InsightKind, RuleId};

/// Rows with the given status, in comparison order
fn rows_with_status<'a>(
    comparisons: &'a [ComparisonRow],
    near_limit: Decimal,
    status: BudgetStatus,
) -> impl Iterator<Item = &'a ComparisonRow> + 'a {
    comparisons
        .iter()
        .filter(move |row| row.status(near_limit) == status)
}

fn usage_data(row: &ComparisonRow) -> serde_json::Value {
    let data = BudgetUsageData {
        category: row.category.clone(),
        budgeted: row.budgeted,
        actual: row.actual,
        percent_used: row.percent_used(),
    };
    serde_json::to_value(&data).unwrap_or_default()
}

/// Warns about every category whose spending exceeds its budget
pub struct OverBudgetRule;

impl OverBudgetRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OverBudgetRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightRule for OverBudgetRule {
    fn id(&self) -> RuleId {
        RuleId::OverBudget
    }

    fn name(&self) -> &'static str {
        "Over Budget"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let symbol = &ctx.config.currency_symbol;

        let near_limit = ctx.config.thresholds.near_limit_percent;

        rows_with_status(ctx.comparisons, near_limit, BudgetStatus::Over)
            .map(|row| {
                let spent = format!(
                    "You've spent {} out of {}",
                    money(symbol, row.actual),
                    money(symbol, row.budgeted)
                );
                // A zero budget has no meaningful percentage
                let description = match row.percent_used() {
                    Some(pct) => format!("{} ({}%)", spent, fixed(pct, 0)),
                    None => {
                        tracing::warn!(
                            category = row.category.as_str(),
                            "Budget amount is not positive, omitting percentage"
                        );
                        spent
                    }
                };

                Insight::new(
                    RuleId::OverBudget,
                    InsightKind::Warning,
                    format!("{}:{}", RuleId::OverBudget, row.category),
                    format!("Over Budget: {}", row.category),
                    description,
                )
                .with_data(usage_data(row))
            })
            .collect()
    }
}

/// Flags categories that are close to, but not over, their budget
pub struct ApproachingLimitRule;

impl ApproachingLimitRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ApproachingLimitRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightRule for ApproachingLimitRule {
    fn id(&self) -> RuleId {
        RuleId::ApproachingLimit
    }

    fn name(&self) -> &'static str {
        "Approaching Budget Limit"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let near_limit = ctx.config.thresholds.near_limit_percent;

        rows_with_status(ctx.comparisons, near_limit, BudgetStatus::Near)
            .filter_map(|row| {
                // Near is only reachable with a positive budget
                let pct = row.percent_used()?;
                Some(
                    Insight::new(
                        RuleId::ApproachingLimit,
                        InsightKind::Info,
                        format!("{}:{}", RuleId::ApproachingLimit, row.category),
                        format!("Approaching Budget Limit: {}", row.category),
                        format!(
                            "You've spent {}% of your budget for {}",
                            fixed(pct, 0),
                            row.category
                        ),
                    )
                    .with_data(usage_data(row)),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::Aggregation;
    use crate::config::AnalyticsConfig;
    use crate::models::Summary;
    use rust_decimal_macros::dec;

    fn row(category: &str, budgeted: Decimal, actual: Decimal) -> ComparisonRow {
        ComparisonRow {
            category: category.to_string(),
            category_id: format!("id-{}", category),
            budgeted,
            actual,
            remaining: (budgeted - actual).max(Decimal::ZERO),
        }
    }

    fn empty_summary() -> Summary {
        Summary {
            total_income: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            balance: Decimal::ZERO,
            transaction_count: 0,
            savings_rate: None,
        }
    }

    fn evaluate(rule: &dyn InsightRule, rows: &[ComparisonRow]) -> Vec<Insight> {
        let aggregation = Aggregation::default();
        let summary = empty_summary();
        let config = AnalyticsConfig::default();
        let ctx = AnalysisContext::new(rows, &aggregation, &summary, &config);
        rule.evaluate(&ctx)
    }

    #[test]
    fn test_over_budget_description() {
        let rows = vec![row("Food", dec!(1000), dec!(1200))];
        let insights = evaluate(&OverBudgetRule::new(), &rows);

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Warning);
        assert_eq!(insights[0].key, "over_budget:Food");
        assert_eq!(
            insights[0].description,
            "You've spent ₹1200.00 out of ₹1000.00 (120%)"
        );

        let data: BudgetUsageData = serde_json::from_value(insights[0].data.clone()).unwrap();
        assert_eq!(data.percent_used, Some(dec!(120)));
    }

    #[test]
    fn test_over_budget_keeps_row_order() {
        let rows = vec![
            row("Rent", dec!(1000), dec!(1001)),
            row("Food", dec!(100), dec!(50)),
            row("Books", dec!(20), dec!(45)),
        ];
        let titles: Vec<String> = evaluate(&OverBudgetRule::new(), &rows)
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["Over Budget: Rent", "Over Budget: Books"]);
    }

    #[test]
    fn test_over_budget_zero_budget_has_no_percentage() {
        let rows = vec![row("Gifts", Decimal::ZERO, dec!(30))];
        let insights = evaluate(&OverBudgetRule::new(), &rows);

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].description, "You've spent ₹30.00 out of ₹0.00");
    }

    #[test]
    fn test_approaching_limit_rounds_percentage() {
        let rows = vec![row("Food", dec!(300), dec!(250))];
        let insights = evaluate(&ApproachingLimitRule::new(), &rows);

        assert_eq!(insights.len(), 1);
        assert_eq!(
            insights[0].description,
            "You've spent 83% of your budget for Food"
        );
    }

    #[test]
    fn test_approaching_limit_excludes_over_budget() {
        let rows = vec![
            row("Food", dec!(1000), dec!(1200)),
            row("Rent", dec!(1000), dec!(800)),
            row("Fun", dec!(1000), dec!(801)),
        ];
        let insights = evaluate(&ApproachingLimitRule::new(), &rows);

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "Approaching Budget Limit: Fun");
    }
}
