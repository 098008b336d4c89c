//! Savings Rate Insight
//!
//! Comments on the share of income left after expenses. Skipped entirely
//! without income. Rates between the low and high thresholds (inclusive)
//! produce nothing.

use crate::format::fixed;

use super::engine::{AnalysisContext, InsightRule};
use super::types::{Insight, InsightKind, RuleId, SavingsRateData};

/// Celebrates a high savings rate or warns about a low one
pub struct SavingsRateRule;

impl SavingsRateRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SavingsRateRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightRule for SavingsRateRule {
    fn id(&self) -> RuleId {
        RuleId::SavingsRate
    }

    fn name(&self) -> &'static str {
        "Savings Rate"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let summary = ctx.summary;
        let Some(rate) = summary.savings_rate else {
            return vec![];
        };
        let thresholds = &ctx.config.thresholds;

        let insight = if rate > thresholds.high_savings_percent {
            Insight::new(
                RuleId::SavingsRate,
                InsightKind::Success,
                format!("{}:high", RuleId::SavingsRate),
                "Great Savings Rate!",
                format!(
                    "You're saving {}% of your income this month",
                    fixed(rate, 1)
                ),
            )
        } else if rate < thresholds.low_savings_percent {
            Insight::new(
                RuleId::SavingsRate,
                InsightKind::Warning,
                format!("{}:low", RuleId::SavingsRate),
                "Low Savings Rate",
                format!(
                    "Your savings rate is just {}%. Consider reviewing expenses.",
                    fixed(rate, 1)
                ),
            )
        } else {
            return vec![];
        };

        let data = SavingsRateData {
            total_income: summary.total_income,
            total_expenses: summary.total_expenses,
            savings_rate: rate,
        };

        vec![insight.with_data(serde_json::to_value(&data).unwrap_or_default())]
    }
}
