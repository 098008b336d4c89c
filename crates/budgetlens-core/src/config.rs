//! Analytics configuration
//!
//! Thresholds for the insight rules, aggregation behaviour and display
//! settings. Config is loaded with a two-layer resolution:
//! 1. Check for an override (explicit path, or
//!    ~/.local/share/budgetlens/config/analytics.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! An explicit path must exist; only the per-user override is optional.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::CategoryKey;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analytics.toml");

/// Thresholds used by the insight rules, all in percent
#[derive(Debug, Clone, PartialEq)]
pub struct InsightThresholds {
    /// Spending share above which a budget is approaching its limit
    pub near_limit_percent: Decimal,
    /// Savings rate above which savings are celebrated
    pub high_savings_percent: Decimal,
    /// Savings rate below which savings are flagged
    pub low_savings_percent: Decimal,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            near_limit_percent: Decimal::from(80),
            high_savings_percent: Decimal::from(20),
            low_savings_percent: Decimal::from(5),
        }
    }
}

/// Full analytics configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsConfig {
    pub thresholds: InsightThresholds,
    /// Category grouping key for aggregation and budget matching
    pub category_key: CategoryKey,
    /// Merge the same month of different years in the monthly series
    pub merge_months_across_years: bool,
    /// Prefix for amounts in insight descriptions
    pub currency_symbol: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            thresholds: InsightThresholds::default(),
            category_key: CategoryKey::Name,
            merge_months_across_years: true,
            currency_symbol: "₹".to_string(),
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration (override first, then embedded default)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let content = match override_path {
            Some(path) if !path.exists() => {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => read_override(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => read_override(&path)?,
                _ => {
                    tracing::debug!("Using embedded analytics config");
                    DEFAULT_CONFIG.to_string()
                }
            },
        };

        parse_config(&content)
    }
}

fn read_override(path: &Path) -> Result<String> {
    tracing::debug!(path = %path.display(), "Loading analytics config override");
    fs::read_to_string(path).map_err(|e| Error::Config(format!("Failed to read config: {}", e)))
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("budgetlens").join("config").join("analytics.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    insights: Option<RawInsights>,
    aggregation: Option<RawAggregation>,
    display: Option<RawDisplay>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    near_limit_percent: Option<RawPercent>,
    high_savings_percent: Option<RawPercent>,
    low_savings_percent: Option<RawPercent>,
}

/// A percentage written as a TOML integer or float
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum RawPercent {
    Whole(i64),
    Fraction(f64),
}

impl RawPercent {
    fn to_decimal(self, key: &str) -> Result<Decimal> {
        let value = match self {
            Self::Whole(n) => Decimal::from(n),
            Self::Fraction(f) => Decimal::try_from(f)
                .map_err(|e| Error::Config(format!("Invalid {}: {}", key, e)))?,
        };
        if value < Decimal::ZERO {
            return Err(Error::Config(format!(
                "{} must not be negative, got {}",
                key, value
            )));
        }
        Ok(value)
    }
}

#[derive(Debug, Deserialize)]
struct RawAggregation {
    category_key: Option<String>,
    merge_months_across_years: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency_symbol: Option<String>,
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<AnalyticsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AnalyticsConfig::default();

    if let Some(insights) = raw.insights {
        if let Some(near) = insights.near_limit_percent {
            config.thresholds.near_limit_percent = near.to_decimal("near_limit_percent")?;
        }
        if let Some(high) = insights.high_savings_percent {
            config.thresholds.high_savings_percent = high.to_decimal("high_savings_percent")?;
        }
        if let Some(low) = insights.low_savings_percent {
            config.thresholds.low_savings_percent = low.to_decimal("low_savings_percent")?;
        }
    }

    if config.thresholds.low_savings_percent > config.thresholds.high_savings_percent {
        return Err(Error::Config(format!(
            "low_savings_percent ({}) must not exceed high_savings_percent ({})",
            config.thresholds.low_savings_percent, config.thresholds.high_savings_percent
        )));
    }

    if let Some(aggregation) = raw.aggregation {
        if let Some(key) = aggregation.category_key {
            config.category_key = key.parse().map_err(Error::Config)?;
        }
        if let Some(merge) = aggregation.merge_months_across_years {
            config.merge_months_across_years = merge;
        }
    }

    if let Some(display) = raw.display {
        if let Some(symbol) = display.currency_symbol {
            config.currency_symbol = symbol;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, AnalyticsConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config(
            r#"
            [insights]
            near_limit_percent = 90

            [display]
            currency_symbol = "$"
            "#,
        )
        .unwrap();

        assert_eq!(config.thresholds.near_limit_percent, Decimal::from(90));
        assert_eq!(config.thresholds.high_savings_percent, Decimal::from(20));
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.category_key, CategoryKey::Name);
    }

    #[test]
    fn test_category_key_override() {
        let config = parse_config(
            r#"
            [aggregation]
            category_key = "id"
            merge_months_across_years = false
            "#,
        )
        .unwrap();

        assert_eq!(config.category_key, CategoryKey::Id);
        assert!(!config.merge_months_across_years);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(parse_config("[insights\n").is_err());
        assert!(parse_config("[aggregation]\ncategory_key = \"color\"").is_err());
        assert!(parse_config(
            "[insights]\nlow_savings_percent = 30\nhigh_savings_percent = 20"
        )
        .is_err());
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = AnalyticsConfig::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_fractional_thresholds() {
        let config = parse_config(
            r#"
            [insights]
            near_limit_percent = 82.5
            low_savings_percent = 2.5
            "#,
        )
        .unwrap();

        assert_eq!(config.thresholds.near_limit_percent, Decimal::new(825, 1));
        assert_eq!(config.thresholds.low_savings_percent, Decimal::new(25, 1));
        assert_eq!(config.thresholds.high_savings_percent, Decimal::from(20));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        assert!(matches!(
            parse_config("[insights]\nnear_limit_percent = -1"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_override_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("analytics.toml");
        fs::write(&path, "[insights]\nlow_savings_percent = 10\n").unwrap();

        let config = AnalyticsConfig::load(Some(&path)).unwrap();
        assert_eq!(config.thresholds.low_savings_percent, Decimal::from(10));
    }
}
