//! Domain models for Budgetlens

use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Short month labels, indexed by `month - 1`
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Earliest year a budget may target
pub const MIN_BUDGET_YEAR: i32 = 2020;

/// A spending/income classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    /// Display name, unique within a store
    pub name: String,
    /// Hex color used by charts (e.g. "#EF4444")
    pub color: String,
    /// Icon tag (e.g. "Utensils")
    pub icon: String,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            icon: icon.into(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!(
                "Unknown transaction kind: {} (valid: income, expense)",
                s
            )),
        }
    }
}

/// A transaction with its category resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Always positive; direction is carried by `kind`
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: Category,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

/// A monthly spending limit for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub amount: Decimal,
    /// 1-12
    pub month: u32,
    pub year: i32,
    pub category: Category,
}

impl Budget {
    pub fn period(&self) -> Period {
        Period {
            month: self.month,
            year: self.year,
        }
    }
}

/// A (month, year) pair scoping which facts are considered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    pub month: u32,
    pub year: i32,
}

impl Period {
    /// Create a period, rejecting months outside 1-12
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidData(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok(Self { month, year })
    }

    /// The period containing today's local date
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            month: today.month(),
            year: today.year(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey {
            year: self.year,
            month: self.month,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.month_key().label_with_year())
    }
}

/// Calendar month key, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Short month name ("Jan"), the same for every year
    pub fn label(&self) -> &'static str {
        (self.month as usize)
            .checked_sub(1)
            .and_then(|i| MONTH_LABELS.get(i))
            .copied()
            .unwrap_or("???")
    }

    /// Month name with year ("Jan 2025")
    pub fn label_with_year(&self) -> String {
        format!("{} {}", self.label(), self.year)
    }
}

/// Which category field transactions are grouped by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    /// Group by display name; categories sharing a name are merged
    #[default]
    Name,
    /// Group by category id
    Id,
}

impl CategoryKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Id => "id",
        }
    }

    /// Extract the grouping key from a category
    pub fn key_of<'a>(&self, category: &'a Category) -> &'a str {
        match self {
            Self::Name => &category.name,
            Self::Id => &category.id,
        }
    }
}

impl std::str::FromStr for CategoryKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "id" => Ok(Self::Id),
            _ => Err(format!("Unknown category key: {} (valid: name, id)", s)),
        }
    }
}

// ========== Report Models ==========

/// Summed amount for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Grouping key (name or id, see `CategoryKey`)
    pub key: String,
    /// Display name of the first category seen under this key
    pub name: String,
    pub color: String,
    pub amount: Decimal,
    pub transaction_count: usize,
}

/// Income and expense for one month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

/// A point in the monthly income/expense series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
}

/// One slice of the category expense breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub name: String,
    pub color: String,
    pub amount: Decimal,
    /// Share of total expenses, 0-100
    pub percentage: Decimal,
}

/// Budgeted vs actual spending for one budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub category: String,
    pub category_id: String,
    pub budgeted: Decimal,
    pub actual: Decimal,
    /// Never negative; see `overspend` for the amount over budget
    pub remaining: Decimal,
}

/// Top-level totals for a set of transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub transaction_count: usize,
    /// Percent of income not spent; None without income
    pub savings_rate: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_validation() {
        assert!(Period::new(0, 2025).is_err());
        assert!(Period::new(13, 2025).is_err());
        assert_eq!(
            Period::new(3, 2025).unwrap(),
            Period {
                month: 3,
                year: 2025
            }
        );
    }

    #[test]
    fn test_period_contains() {
        let period = Period::new(2, 2024).unwrap();
        assert!(period.contains(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    }

    #[test]
    fn test_month_key_labels_and_order() {
        let dec_2024 = MonthKey::from_date(NaiveDate::from_ymd_opt(2024, 12, 5).unwrap());
        let jan_2025 = MonthKey::from_date(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());

        assert_eq!(jan_2025.label(), "Jan");
        assert_eq!(dec_2024.label_with_year(), "Dec 2024");
        assert!(dec_2024 < jan_2025);

        let bogus = MonthKey {
            year: 2025,
            month: 0,
        };
        assert_eq!(bogus.label(), "???");
    }

    #[test]
    fn test_kind_and_key_parsing() {
        assert_eq!(
            "Expense".parse::<TransactionKind>().unwrap(),
            TransactionKind::Expense
        );
        assert!("transfer".parse::<TransactionKind>().is_err());
        assert_eq!("ID".parse::<CategoryKey>().unwrap(), CategoryKey::Id);
        assert_eq!(CategoryKey::default(), CategoryKey::Name);
    }

    #[test]
    fn test_kind_serde_lowercase() {
        let json = serde_json::to_string(&TransactionKind::Income).unwrap();
        assert_eq!(json, "\"income\"");
    }
}
