//! Comparator: join budgets to actual spending

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Budget, CategoryKey, ComparisonRow};

use super::{percent_of, Aggregation};

/// Where a category stands against its budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// Within budget and below the near-limit threshold
    Ok,
    /// Above the near-limit threshold but not over budget
    Near,
    /// Actual spending strictly exceeds the budget
    Over,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Near => "near",
            Self::Over => "over",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Produce one comparison row per budget, in budget order.
///
/// Budgets whose category has no expenses get `actual = 0`. `remaining` is
/// clamped at zero; the overspend is available from `ComparisonRow::overspend`.
pub fn compare(budgets: &[Budget], aggregation: &Aggregation, key: CategoryKey) -> Vec<ComparisonRow> {
    budgets
        .iter()
        .map(|budget| {
            let actual = aggregation.expense_for(key.key_of(&budget.category));
            ComparisonRow {
                category: budget.category.name.clone(),
                category_id: budget.category.id.clone(),
                budgeted: budget.amount,
                actual,
                remaining: (budget.amount - actual).max(Decimal::ZERO),
            }
        })
        .collect()
}

/// Sort rows by category name for display
pub fn sort_by_category(rows: &mut [ComparisonRow]) {
    rows.sort_by(|a, b| a.category.cmp(&b.category));
}

impl ComparisonRow {
    /// Amount spent beyond the budget, zero when within budget
    pub fn overspend(&self) -> Decimal {
        (self.actual - self.budgeted).max(Decimal::ZERO)
    }

    /// Share of the budget spent, None for a non-positive budget
    pub fn percent_used(&self) -> Option<Decimal> {
        percent_of(self.actual, self.budgeted)
    }

    pub fn is_over_budget(&self) -> bool {
        self.actual > self.budgeted
    }

    /// Classify the row into exactly one status; over-budget wins over near-limit
    pub fn status(&self, near_limit_percent: Decimal) -> BudgetStatus {
        if self.is_over_budget() {
            return BudgetStatus::Over;
        }
        match self.percent_used() {
            Some(pct) if pct > near_limit_percent => BudgetStatus::Near,
            _ => BudgetStatus::Ok,
        }
    }
}
