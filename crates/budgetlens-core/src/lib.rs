//! Budgetlens Core Library
//!
//! Analytics for the Budgetlens personal finance tracker:
//! - Aggregation of transactions by category and month
//! - Budget vs actual comparison
//! - Rule-based spending insights
//! - Period summaries and dashboard reports
//! - JSON file and in-memory fact stores

pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod insights;
pub mod models;
pub mod report;
pub mod store;

/// Fixture builders for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analytics::{aggregate, compare, sort_by_category, summarize, Aggregation, BudgetStatus};
pub use config::{default_config_path, parse_config, AnalyticsConfig, InsightThresholds};
pub use error::{Error, Result};
pub use insights::{
    AnalysisContext, Insight, InsightEngine, InsightKind, InsightRule, RuleId,
};
pub use models::*;
pub use report::{analyze_period, PeriodReport};
pub use store::{
    Dataset, FactStore, Facts, InMemoryStore, JsonFileStore, NewBudget, NewTransaction,
    TransactionScope,
};
