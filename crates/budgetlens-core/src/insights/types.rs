//! Core types for the Insight Engine

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rules that can produce insights, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    /// Spending in a category exceeds its budget
    OverBudget,
    /// Spending in a category is close to its budget
    ApproachingLimit,
    /// The category with the largest expense total
    TopCategory,
    /// Share of income left after expenses
    SavingsRate,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::OverBudget => "over_budget",
            RuleId::ApproachingLimit => "approaching_limit",
            RuleId::TopCategory => "top_category",
            RuleId::SavingsRate => "savings_rate",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "over_budget" => Ok(RuleId::OverBudget),
            "approaching_limit" => Ok(RuleId::ApproachingLimit),
            "top_category" => Ok(RuleId::TopCategory),
            "savings_rate" => Ok(RuleId::SavingsRate),
            _ => Err(format!("Unknown insight rule: {}", s)),
        }
    }
}

/// Severity of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Something needs attention
    Warning,
    /// Neutral observation
    Info,
    /// Positive news
    Success,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Warning => "warning",
            InsightKind::Info => "info",
            InsightKind::Success => "success",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(InsightKind::Warning),
            "info" => Ok(InsightKind::Info),
            "success" => Ok(InsightKind::Success),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// A human-readable observation produced by a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Rule that produced this insight
    pub rule: RuleId,
    pub kind: InsightKind,
    /// Stable key for deduplication (e.g., "over_budget:Food")
    pub key: String,
    /// Short title (e.g., "Over Budget: Food")
    pub title: String,
    /// One-line description with the figures behind the insight
    pub description: String,
    /// Rule-specific structured data
    pub data: serde_json::Value,
}

impl Insight {
    pub fn new(
        rule: RuleId,
        kind: InsightKind,
        key: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            kind,
            key: key.into(),
            title: title.into(),
            description: description.into(),
            data: serde_json::Value::Null,
        }
    }

    /// Add structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

/// Data for over-budget and approaching-limit insights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetUsageData {
    pub category: String,
    pub budgeted: Decimal,
    pub actual: Decimal,
    /// Unrounded `actual / budgeted * 100`; None for a non-positive budget
    pub percent_used: Option<Decimal>,
}

/// Data for the top-category insight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCategoryData {
    pub category: String,
    pub amount: Decimal,
    pub transaction_count: usize,
}

/// Data for the savings-rate insight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsRateData {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    /// Unrounded savings rate in percent
    pub savings_rate: Decimal,
}
