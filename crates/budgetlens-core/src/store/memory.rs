//! In-memory fact store

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use super::{
    BudgetRecord, Dataset, FactStore, NewBudget, NewTransaction, TransactionRecord,
    TransactionScope, DEFAULT_CATEGORIES,
};
use crate::error::{Error, Result};
use crate::models::{Budget, Category, Period, Transaction, MIN_BUDGET_YEAR};

/// Holds a dataset in memory and enforces its invariants on write:
/// unique category names, positive amounts, valid budget periods and at
/// most one budget per (category, month, year).
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    dataset: Dataset,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a loaded dataset, checking every reference and the
    /// uniqueness of category names and budget periods
    pub fn from_dataset(dataset: Dataset) -> Result<Self> {
        let mut names: HashMap<String, &str> = HashMap::new();
        for category in &dataset.categories {
            if let Some(existing) = names.insert(category.name.to_lowercase(), &category.id) {
                return Err(Error::InvalidData(format!(
                    "Category name '{}' used by both {} and {}",
                    category.name, existing, category.id
                )));
            }
        }

        let mut periods = HashSet::new();
        for budget in &dataset.budgets {
            if !periods.insert((&budget.category_id, budget.month, budget.year)) {
                return Err(Error::InvalidData(format!(
                    "Duplicate budget {} for category {} in {}/{}",
                    budget.id, budget.category_id, budget.month, budget.year
                )));
            }
        }

        let store = Self { dataset };
        for tx in &store.dataset.transactions {
            store.category(&tx.category_id)?;
        }
        for budget in &store.dataset.budgets {
            store.category(&budget.category_id)?;
        }

        tracing::debug!(
            categories = store.dataset.categories.len(),
            transactions = store.dataset.transactions.len(),
            budgets = store.dataset.budgets.len(),
            "Loaded dataset"
        );
        Ok(store)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Look up a category by id
    pub fn category(&self, id: &str) -> Result<&Category> {
        self.dataset
            .categories
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::NotFound(format!("Category {}", id)))
    }

    /// Look up a category by display name (case-insensitive)
    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        let lower = name.to_lowercase();
        self.dataset
            .categories
            .iter()
            .find(|c| c.name.to_lowercase() == lower)
    }

    /// Add a category; names must be unique ignoring case
    pub fn add_category(&mut self, name: &str, color: &str, icon: &str) -> Result<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData("Category name is required".to_string()));
        }
        if let Some(existing) = self.category_by_name(name) {
            return Err(Error::InvalidData(format!(
                "Category '{}' already exists as '{}'",
                name, existing.name
            )));
        }

        let id = next_id("cat", self.dataset.categories.iter().map(|c| c.id.as_str()));
        let category = Category::new(id, name, color, icon);
        self.dataset.categories.push(category.clone());
        Ok(category)
    }

    /// Add the default categories that are not present yet.
    ///
    /// Returns how many were added.
    pub fn seed_default_categories(&mut self) -> Result<usize> {
        let mut added = 0;
        for (name, color, icon) in DEFAULT_CATEGORIES {
            if self.category_by_name(name).is_some() {
                continue;
            }
            self.add_category(name, color, icon)?;
            added += 1;
        }
        Ok(added)
    }

    pub fn add_transaction(&mut self, new: NewTransaction) -> Result<Transaction> {
        if new.amount <= Decimal::ZERO {
            return Err(Error::InvalidData(format!(
                "Transaction amount must be positive, got {}",
                new.amount
            )));
        }
        if new.description.trim().is_empty() {
            return Err(Error::InvalidData(
                "Transaction description is required".to_string(),
            ));
        }
        let category = self.category(&new.category_id)?.clone();

        let id = next_id("tx", self.dataset.transactions.iter().map(|t| t.id.as_str()));
        let record = TransactionRecord {
            id,
            amount: new.amount,
            description: new.description,
            date: new.date,
            kind: new.kind,
            category_id: new.category_id,
        };
        let tx = join_transaction(&record, category);
        self.dataset.transactions.push(record);
        Ok(tx)
    }

    /// Create a budget, or replace the amount of the existing budget for the
    /// same (category, month, year)
    pub fn upsert_budget(&mut self, new: NewBudget) -> Result<Budget> {
        if new.amount <= Decimal::ZERO {
            return Err(Error::InvalidData(format!(
                "Budget amount must be positive, got {}",
                new.amount
            )));
        }
        Period::new(new.month, new.year)?;
        if new.year < MIN_BUDGET_YEAR {
            return Err(Error::InvalidData(format!(
                "Budget year must be {} or later, got {}",
                MIN_BUDGET_YEAR, new.year
            )));
        }
        let category = self.category(&new.category_id)?.clone();

        if let Some(existing) = self.dataset.budgets.iter_mut().find(|b| {
            b.category_id == new.category_id && b.month == new.month && b.year == new.year
        }) {
            tracing::debug!(
                budget = existing.id.as_str(),
                old = %existing.amount,
                new = %new.amount,
                "Replacing budget amount"
            );
            existing.amount = new.amount;
            return Ok(join_budget(existing, category));
        }

        let id = next_id("budget", self.dataset.budgets.iter().map(|b| b.id.as_str()));
        let record = BudgetRecord {
            id,
            amount: new.amount,
            month: new.month,
            year: new.year,
            category_id: new.category_id,
        };
        let budget = join_budget(&record, category);
        self.dataset.budgets.push(record);
        Ok(budget)
    }
}

/// `{prefix}-{n}` with `n` one past the highest numeric suffix in use
fn next_id<'a>(prefix: &str, ids: impl Iterator<Item = &'a str>) -> String {
    let highest = ids
        .filter_map(|id| id.strip_prefix(prefix)?.strip_prefix('-')?.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{}-{}", prefix, highest + 1)
}

fn join_transaction(record: &TransactionRecord, category: Category) -> Transaction {
    Transaction {
        id: record.id.clone(),
        amount: record.amount,
        description: record.description.clone(),
        date: record.date,
        kind: record.kind,
        category,
    }
}

fn join_budget(record: &BudgetRecord, category: Category) -> Budget {
    Budget {
        id: record.id.clone(),
        amount: record.amount,
        month: record.month,
        year: record.year,
        category,
    }
}

impl FactStore for InMemoryStore {
    fn categories(&self) -> Result<Vec<Category>> {
        let mut categories = self.dataset.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    fn transactions(&self, scope: TransactionScope) -> Result<Vec<Transaction>> {
        let mut transactions = self
            .dataset
            .transactions
            .iter()
            .filter(|t| match scope {
                TransactionScope::Period(period) => period.contains(t.date),
                TransactionScope::All => true,
            })
            .map(|t| Ok(join_transaction(t, self.category(&t.category_id)?.clone())))
            .collect::<Result<Vec<_>>>()?;

        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(transactions)
    }

    fn budgets(&self, period: Period) -> Result<Vec<Budget>> {
        let mut budgets = self
            .dataset
            .budgets
            .iter()
            .filter(|b| b.month == period.month && b.year == period.year)
            .map(|b| Ok(join_budget(b, self.category(&b.category_id)?.clone())))
            .collect::<Result<Vec<_>>>()?;

        budgets.sort_by(|a, b| a.category.name.cmp(&b.category.name));
        Ok(budgets)
    }
}
