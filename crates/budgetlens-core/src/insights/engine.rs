//! Insight Engine - runs the rule list over a period's analytics

use crate::analytics::Aggregation;
use crate::config::AnalyticsConfig;
use crate::models::{ComparisonRow, Summary};

use super::types::{Insight, RuleId};
use super::{ApproachingLimitRule, OverBudgetRule, SavingsRateRule, TopCategoryRule};

/// Context provided to insight rules
pub struct AnalysisContext<'a> {
    /// Budget comparison rows, in the order insights should appear
    pub comparisons: &'a [ComparisonRow],
    /// Category and month sums for the period's transactions
    pub aggregation: &'a Aggregation,
    /// Totals for the period's transactions
    pub summary: &'a Summary,
    /// Thresholds and display settings
    pub config: &'a AnalyticsConfig,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        comparisons: &'a [ComparisonRow],
        aggregation: &'a Aggregation,
        summary: &'a Summary,
        config: &'a AnalyticsConfig,
    ) -> Self {
        Self {
            comparisons,
            aggregation,
            summary,
            config,
        }
    }
}

/// Trait for insight rules
pub trait InsightRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> RuleId;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and produce insights (possibly none)
    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight>;
}

/// Runs registered rules in registration order
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules in display order
    pub fn new() -> Self {
        let mut engine = Self { rules: vec![] };

        engine.register(Box::new(OverBudgetRule::new()));
        engine.register(Box::new(ApproachingLimitRule::new()));
        engine.register(Box::new(TopCategoryRule::new()));
        engine.register(Box::new(SavingsRateRule::new()));

        engine
    }

    /// Append a rule; it runs after every rule registered before it
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    /// Run all rules and concatenate their insights.
    ///
    /// The result order is the display order: rule by rule, and within a
    /// rule in the order it emitted them. No further sorting is applied.
    pub fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let mut insights = vec![];

        for rule in &self.rules {
            let found = rule.evaluate(ctx);
            tracing::debug!(
                rule = rule.id().as_str(),
                count = found.len(),
                "Insight rule evaluated"
            );
            insights.extend(found);
        }

        insights
    }

    /// Registered rules, in evaluation order
    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.rules.iter().map(|r| r.id()).collect()
    }
}
