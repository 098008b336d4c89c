//! Fact store adapter
//!
//! Supplies the analytics with transactions and budgets. Records reference
//! their category by id; reads return them with the category resolved.
//!
//! - `InMemoryStore` - the reference implementation, used by tests
//! - `JsonFileStore` - an `InMemoryStore` loaded from and saved to a JSON file

mod json;
mod memory;

pub use json::{Dataset, JsonFileStore};
pub use memory::InMemoryStore;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Budget, Category, Period, Transaction, TransactionKind};

/// Which transactions a read covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionScope {
    /// Only transactions dated within the period (dashboard, insights)
    Period(Period),
    /// Every transaction (category and monthly charts)
    All,
}

/// Transactions and budgets for one period
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Facts {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
}

/// Read contract between the analytics and the persistence layer
pub trait FactStore {
    /// All categories, ordered by name
    fn categories(&self) -> Result<Vec<Category>>;

    /// Transactions in scope, newest first
    fn transactions(&self, scope: TransactionScope) -> Result<Vec<Transaction>>;

    /// Budgets targeting the period, ordered by category name
    fn budgets(&self, period: Period) -> Result<Vec<Budget>>;

    /// Period-filtered transactions and budgets together
    fn facts(&self, period: Period) -> Result<Facts> {
        Ok(Facts {
            transactions: self.transactions(TransactionScope::Period(period))?,
            budgets: self.budgets(period)?,
        })
    }
}

/// A stored transaction, category by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category_id: String,
}

/// A stored budget, category by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecord {
    pub id: String,
    pub amount: Decimal,
    pub month: u32,
    pub year: i32,
    pub category_id: String,
}

/// Input for creating a transaction
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category_id: String,
}

/// Input for creating or replacing a budget
#[derive(Debug, Clone)]
pub struct NewBudget {
    pub amount: Decimal,
    pub month: u32,
    pub year: i32,
    pub category_id: String,
}

/// Categories every new dataset starts with: (name, color, icon)
pub const DEFAULT_CATEGORIES: &[(&str, &str, &str)] = &[
    ("Food & Dining", "#EF4444", "Utensils"),
    ("Transportation", "#3B82F6", "Car"),
    ("Shopping", "#10B981", "ShoppingBag"),
    ("Entertainment", "#F59E0B", "Film"),
    ("Bills & Utilities", "#8B5CF6", "Receipt"),
    ("Healthcare", "#EC4899", "Heart"),
    ("Income", "#06B6D4", "TrendingUp"),
    ("Education", "#F97316", "BookOpen"),
    ("Travel", "#84CC16", "Plane"),
    ("Fitness", "#22D3EE", "Dumbbell"),
    ("Investment", "#A855F7", "TrendingUp"),
    ("Insurance", "#EF4444", "Shield"),
    ("Gifts", "#F59E0B", "Gift"),
    ("Personal Care", "#EC4899", "Sparkles"),
    ("Home & Garden", "#10B981", "Home"),
    ("Technology", "#6366F1", "Smartphone"),
    ("Clothing", "#8B5CF6", "Shirt"),
    ("Pets", "#F59E0B", "Heart"),
    ("Charity", "#10B981", "Heart"),
    ("Business", "#3B82F6", "Briefcase"),
    ("Taxes", "#EF4444", "Calculator"),
    ("Subscriptions", "#8B5CF6", "CreditCard"),
    ("Savings", "#10B981", "PiggyBank"),
    ("Emergency Fund", "#EF4444", "AlertTriangle"),
    ("Miscellaneous", "#6B7280", "MoreHorizontal"),
];
