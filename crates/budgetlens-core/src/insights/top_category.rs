//! Top Spending Category Insight
//!
//! Names the category with the largest expense total. Equal totals are
//! resolved by category name so the choice is reproducible.

use crate::format::money;

use super::engine::{AnalysisContext, InsightRule};
use super::types::{Insight, InsightKind, RuleId, TopCategoryData};

/// Calls out the single largest expense category
pub struct TopCategoryRule;

impl TopCategoryRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TopCategoryRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightRule for TopCategoryRule {
    fn id(&self) -> RuleId {
        RuleId::TopCategory
    }

    fn name(&self) -> &'static str {
        "Top Spending Category"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let Some(top) = ctx.aggregation.top_expense_category() else {
            return vec![];
        };

        let data = TopCategoryData {
            category: top.name.clone(),
            amount: top.amount,
            transaction_count: top.transaction_count,
        };

        vec![Insight::new(
            RuleId::TopCategory,
            InsightKind::Info,
            format!("{}:{}", RuleId::TopCategory, top.key),
            "Top Spending Category",
            format!(
                "{} is your highest expense this month ({})",
                top.name,
                money(&ctx.config.currency_symbol, top.amount)
            ),
        )
        .with_data(serde_json::to_value(&data).unwrap_or_default())]
    }
}
