//! Insight Engine - human-readable observations about a period
//!
//! Rules run in a fixed order and their output is concatenated; the result
//! order is the display order.
//!
//! ## Rules
//!
//! 1. **Over Budget** - warning per category spending more than its budget
//! 2. **Approaching Limit** - info per category past the near-limit threshold
//! 3. **Top Category** - info naming the largest expense category
//! 4. **Savings Rate** - success or warning on the share of income saved
//!
//! ## Usage
//!
//! ```rust,ignore
//! use budgetlens_core::insights::{AnalysisContext, InsightEngine};
//!
//! let engine = InsightEngine::new();
//! let ctx = AnalysisContext::new(&rows, &aggregation, &summary, &config);
//! let insights = engine.analyze(&ctx);
//! ```

pub mod budget_alerts;
pub mod engine;
pub mod savings_rate;
pub mod top_category;
pub mod types;

pub use budget_alerts::{ApproachingLimitRule, OverBudgetRule};
pub use engine::{AnalysisContext, InsightEngine, InsightRule};
pub use savings_rate::SavingsRateRule;
pub use top_category::TopCategoryRule;
pub use types::{
    BudgetUsageData, Insight, InsightKind, RuleId, SavingsRateData, TopCategoryData,
};
