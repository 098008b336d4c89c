//! Test utilities for budgetlens-core
//!
//! Fixture builders for categories, transactions and budgets. Dates are
//! given as `YYYY-MM-DD` strings and panic when malformed.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Budget, Category, Transaction, TransactionKind};
use crate::store::{InMemoryStore, NewBudget, NewTransaction};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id(prefix: &str) -> String {
    format!("{}-{}", prefix, NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Parse a `YYYY-MM-DD` fixture date
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Category with a neutral color and icon
pub fn category(id: &str, name: &str) -> Category {
    Category::new(id, name, "#000000", "Tag")
}

pub fn expense(category: &Category, amount: Decimal, on: &str) -> Transaction {
    transaction(category, amount, on, TransactionKind::Expense)
}

pub fn income(category: &Category, amount: Decimal, on: &str) -> Transaction {
    transaction(category, amount, on, TransactionKind::Income)
}

fn transaction(category: &Category, amount: Decimal, on: &str, kind: TransactionKind) -> Transaction {
    Transaction {
        id: next_id("tx"),
        amount,
        description: format!("{} {}", kind, category.name),
        date: date(on),
        kind,
        category: category.clone(),
    }
}

pub fn budget(category: &Category, amount: Decimal, month: u32, year: i32) -> Budget {
    Budget {
        id: next_id("budget"),
        amount,
        month,
        year,
        category: category.clone(),
    }
}

/// Store-level helpers that go through validation
pub trait StoreFixtures {
    /// Id of the category with this name, creating it if needed
    fn category_id(&mut self, name: &str) -> String;
    fn spend(&mut self, category: &str, amount: Decimal, on: &str);
    fn earn(&mut self, category: &str, amount: Decimal, on: &str);
    fn set_budget(&mut self, category: &str, amount: Decimal, month: u32, year: i32);
}

impl StoreFixtures for InMemoryStore {
    fn category_id(&mut self, name: &str) -> String {
        if let Some(existing) = self.category_by_name(name) {
            return existing.id.clone();
        }
        self.add_category(name, "#000000", "Tag").unwrap().id
    }

    fn spend(&mut self, category: &str, amount: Decimal, on: &str) {
        add(self, category, amount, on, TransactionKind::Expense);
    }

    fn earn(&mut self, category: &str, amount: Decimal, on: &str) {
        add(self, category, amount, on, TransactionKind::Income);
    }

    fn set_budget(&mut self, category: &str, amount: Decimal, month: u32, year: i32) {
        let category_id = self.category_id(category);
        self.upsert_budget(NewBudget {
            amount,
            month,
            year,
            category_id,
        })
        .unwrap();
    }
}

fn add(store: &mut InMemoryStore, category: &str, amount: Decimal, on: &str, kind: TransactionKind) {
    let category_id = store.category_id(category);
    store
        .add_transaction(NewTransaction {
            amount,
            description: format!("{} {}", kind, category),
            date: date(on),
            kind,
            category_id,
        })
        .unwrap();
}
