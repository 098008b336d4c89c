//! Aggregator: reduce transactions into category and month sums

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{
    CategoryKey, CategorySlice, CategoryTotal, MonthKey, MonthlyPoint, MonthlyTotals, Transaction,
};

use super::{accumulate, percent_of, total_of};

/// Category and month sums for a set of transactions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// Expense totals keyed by the configured category key
    pub expense_by_category: BTreeMap<String, CategoryTotal>,
    /// Income totals keyed by the configured category key
    pub income_by_category: BTreeMap<String, CategoryTotal>,
    /// Income and expense per calendar month
    pub by_month: BTreeMap<MonthKey, MonthlyTotals>,
}

/// Reduce transactions into per-category and per-month sums.
///
/// Single pass, no failure modes: an empty slice yields empty maps, and sums
/// that overflow clamp at the Decimal range instead of panicking.
pub fn aggregate(transactions: &[Transaction], key: CategoryKey) -> Aggregation {
    let mut aggregation = Aggregation::default();

    for tx in transactions {
        let by_category = if tx.is_expense() {
            &mut aggregation.expense_by_category
        } else {
            &mut aggregation.income_by_category
        };

        let group = key.key_of(&tx.category);
        let total = by_category
            .entry(group.to_string())
            .or_insert_with(|| CategoryTotal {
                key: group.to_string(),
                name: tx.category.name.clone(),
                color: tx.category.color.clone(),
                amount: Decimal::ZERO,
                transaction_count: 0,
            });
        accumulate(&mut total.amount, tx.amount);
        total.transaction_count += 1;

        let month = aggregation.by_month.entry(tx.month_key()).or_default();
        if tx.is_expense() {
            accumulate(&mut month.expense, tx.amount);
        } else {
            accumulate(&mut month.income, tx.amount);
        }
    }

    tracing::trace!(
        transactions = transactions.len(),
        expense_categories = aggregation.expense_by_category.len(),
        months = aggregation.by_month.len(),
        "Aggregated transactions"
    );

    aggregation
}

impl Aggregation {
    pub fn total_expenses(&self) -> Decimal {
        total_of(self.expense_by_category.values().map(|c| c.amount))
    }

    pub fn total_income(&self) -> Decimal {
        total_of(self.income_by_category.values().map(|c| c.amount))
    }

    /// Expense total for a category key, zero when nothing was spent
    pub fn expense_for(&self, key: &str) -> Decimal {
        self.expense_by_category
            .get(key)
            .map(|c| c.amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// The category with the largest expense total.
    ///
    /// Ties go to the alphabetically first category name, then key.
    pub fn top_expense_category(&self) -> Option<&CategoryTotal> {
        self.expense_by_category.values().min_by(|a, b| {
            b.amount
                .cmp(&a.amount)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.key.cmp(&b.key))
        })
    }

    /// Monthly income/expense series in chronological order.
    ///
    /// With `merge_years` the same month of different years collapses into a
    /// single point labelled by month name only ("Jan"), ordered Jan..Dec.
    /// Otherwise every (year, month) gets its own point ("Jan 2025").
    pub fn monthly_series(&self, merge_years: bool) -> Vec<MonthlyPoint> {
        if !merge_years {
            return self
                .by_month
                .iter()
                .map(|(key, totals)| MonthlyPoint {
                    label: key.label_with_year(),
                    income: totals.income,
                    expense: totals.expense,
                })
                .collect();
        }

        let mut merged: BTreeMap<u32, (MonthKey, MonthlyTotals)> = BTreeMap::new();
        for (key, totals) in &self.by_month {
            let slot = merged.entry(key.month).or_insert((*key, MonthlyTotals::default()));
            accumulate(&mut slot.1.income, totals.income);
            accumulate(&mut slot.1.expense, totals.expense);
        }

        merged
            .into_values()
            .map(|(key, totals)| MonthlyPoint {
                label: key.label().to_string(),
                income: totals.income,
                expense: totals.expense,
            })
            .collect()
    }

    /// Expense breakdown by category, largest first (name breaks ties)
    pub fn category_breakdown(&self) -> Vec<CategorySlice> {
        let total = self.total_expenses();

        let mut slices: Vec<CategorySlice> = self
            .expense_by_category
            .values()
            .map(|c| CategorySlice {
                name: c.name.clone(),
                color: c.color.clone(),
                amount: c.amount,
                percentage: percent_of(c.amount, total).unwrap_or(Decimal::ZERO),
            })
            .collect();

        slices.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.name.cmp(&b.name)));
        slices
    }
}
